use crate::history::History;
use crate::model::{Pair, Player, Role};
use super::types::PairingWarning;

/// Completes a matched pair with buyer/organiser roles.
///
/// Each player swaps away from the role they held in their last
/// pairing whenever that is consistent. When both players held the
/// same role, or neither has a history, the lexicographically lower
/// id buys and a warning records why the swap was impossible.
pub fn assign_roles(
    a: &Player,
    b: &Player,
    history: &History,
    warnings: &mut Vec<PairingWarning>,
) -> Pair {
    let last_a = history.last_role(&a.id);
    let last_b = history.last_role(&b.id);

    match (last_a, last_b) {
        (Some(role_a), Some(role_b)) if role_a != role_b => {
            with_role(a, role_a.opposite(), b)
        }
        (Some(role_a), None) => with_role(a, role_a.opposite(), b),
        (None, Some(role_b)) => with_role(b, role_b.opposite(), a),
        (None, None) => {
            warnings.push(PairingWarning::NoRoleHistory {
                a: a.id.clone(),
                b: b.id.clone(),
            });
            lower_id_buys(a, b)
        }
        (Some(role), Some(_)) => {
            warnings.push(PairingWarning::SameRoleRepeat {
                a: a.id.clone(),
                b: b.id.clone(),
                role,
            });
            lower_id_buys(a, b)
        }
    }
}

/// Builds the pair given the role player `a` takes; `b` gets the
/// remaining role.
fn with_role(a: &Player, role: Role, b: &Player) -> Pair {
    match role {
        Role::Buyer => Pair::Matched {
            buyer: a.id.clone(),
            organiser: b.id.clone(),
        },
        Role::Organiser => Pair::Matched {
            buyer: b.id.clone(),
            organiser: a.id.clone(),
        },
    }
}

fn lower_id_buys(a: &Player, b: &Player) -> Pair {
    if a.id <= b.id {
        with_role(a, Role::Buyer, b)
    } else {
        with_role(b, Role::Buyer, a)
    }
}
