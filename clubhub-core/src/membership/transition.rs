//! The request transition table.
//!
//! Every change to a request's status goes through [`apply`]. A static
//! table maps the target status to the edits it implies on the club roster
//! and on the requester's relation lists, so the club side and the account
//! side of a transition cannot drift apart.
//!
//! | Target     | Club roster                         | Requester lists               |
//! |------------|-------------------------------------|-------------------------------|
//! | `pending`  | add to `pendingRequests`            | add to `requested`            |
//! | `approved` | remove pending, add member, count+1 | remove `requested`, add `member` |
//! | `rejected` | remove from `pendingRequests`       | remove `requested`            |
//!
//! Without a club the roster column is skipped. Only rejection is expected
//! to run that way, for a request whose club has been removed.

use super::error::{MembershipError, Result};
use super::types::{Club, Request, RequestStatus};
use crate::identity::{EditOp, MembershipPatch, Relation, RelationEdit};

/// A change to a club's roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RosterEdit {
    AddPending,
    RemovePending,
    AddMember,
}

/// Everything a transition into one status implies.
struct Effects {
    roster: &'static [RosterEdit],
    relations: &'static [(Relation, EditOp)],
}

const fn effects(target: RequestStatus) -> Effects {
    match target {
        RequestStatus::Pending => Effects {
            roster: &[RosterEdit::AddPending],
            relations: &[(Relation::Requested, EditOp::Add)],
        },
        RequestStatus::Approved => Effects {
            roster: &[RosterEdit::RemovePending, RosterEdit::AddMember],
            relations: &[
                (Relation::Requested, EditOp::Remove),
                (Relation::Member, EditOp::Add),
            ],
        },
        RequestStatus::Rejected => Effects {
            roster: &[RosterEdit::RemovePending],
            relations: &[(Relation::Requested, EditOp::Remove)],
        },
    }
}

/// Moves `request` into `target` and updates `club` to match.
///
/// `Pending` opens a freshly created request: the request must still be
/// pending and its requester must not already be on the club's pending
/// list. `Approved` and `Rejected` require a pending request.
///
/// Returns the patch the identity store must apply to the requester.
///
/// # Errors
///
/// Returns [`MembershipError::InvalidTransition`] if the move is not
/// allowed. `club` and `request` are left untouched in that case.
pub(crate) fn apply(
    club: Option<&mut Club>,
    request: &mut Request,
    target: RequestStatus,
) -> Result<MembershipPatch> {
    let allowed = match target {
        RequestStatus::Pending => {
            request.is_pending()
                && club
                    .as_deref()
                    .is_some_and(|c| !c.has_pending(&request.user_id))
        }
        RequestStatus::Approved | RequestStatus::Rejected => {
            request.status.can_transition_to(target)
        }
    };
    if !allowed {
        return Err(MembershipError::InvalidTransition {
            from: request.status,
            to: target,
        });
    }

    let effects = effects(target);
    if let Some(club) = club {
        debug_assert_eq!(club.id, request.club_id);
        for edit in effects.roster {
            apply_roster_edit(club, &request.user_id, *edit);
        }
    }
    request.status = target;

    let patch = effects
        .relations
        .iter()
        .fold(MembershipPatch::new(request.user_id.clone()), |patch, &(relation, op)| {
            patch.with_edit(RelationEdit {
                relation,
                club_id: request.club_id.clone(),
                op,
            })
        });
    Ok(patch)
}

fn apply_roster_edit(club: &mut Club, account_id: &str, edit: RosterEdit) {
    match edit {
        RosterEdit::AddPending => {
            if !club.has_pending(account_id) {
                club.pending_requests.push(account_id.to_string());
            }
        }
        RosterEdit::RemovePending => club.pending_requests.retain(|id| id != account_id),
        RosterEdit::AddMember => {
            if !club.has_member(account_id) {
                club.members.push(account_id.to_string());
                club.member_count += 1;
            }
        }
    }
}
