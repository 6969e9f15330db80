//! Forward simulation preorder over the states of an automaton.

use tracing::trace;

use crate::{BinaryRelation, Nfa};

/// Computes the (forward, direct) simulation preorder of `aut`.
///
/// The resulting relation `R` has `R[p][q]` exactly when `q` can match
/// every move of `p` while preserving membership in the final set at each
/// step. Entries start from the acceptance condition
/// (`final(p) → final(q)`) and are refined greedily until stable: a pair
/// survives as long as every transition of `p` is answered by some
/// transition of `q` on the same symbol into a related pair of targets.
pub fn compute_relation(aut: &Nfa) -> BinaryRelation {
    let size = aut.size();
    let mut relation = BinaryRelation::new(size, false);
    for p in 0..size {
        for q in 0..size {
            if !aut.has_final(p) || aut.has_final(q) {
                relation.set(p, q, true);
            }
        }
    }

    let mut rounds = 0usize;
    let mut changed = true;
    while changed {
        changed = false;
        rounds += 1;
        for p in 0..size {
            for q in 0..size {
                if !relation.get(p, q) {
                    continue;
                }
                let answered = aut.symbol_posts(p).iter().all(|sp| {
                    let q_post = aut.symbol_post(q, sp.symbol());
                    sp.targets().iter().all(|&pt| {
                        q_post.is_some_and(|qsp| {
                            qsp.targets().iter().any(|&qt| relation.get(pt, qt))
                        })
                    })
                });
                if !answered {
                    relation.set(p, q, false);
                    changed = true;
                }
            }
        }
    }
    trace!("Computed simulation preorder over {size} states in {rounds} rounds");
    relation
}
