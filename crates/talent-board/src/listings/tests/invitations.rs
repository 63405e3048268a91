use super::common::*;

use crate::listings::criteria::InvitationCriteria;
use crate::listings::domain::{InvitationId, InvitationStatus};
use crate::listings::service::ListingServiceError;

fn id(raw: &str) -> InvitationId {
    InvitationId(raw.to_string())
}

#[test]
fn accepting_a_pending_invitation_confirms_with_mentor_name() {
    let service = bundled_service(8);

    let response = service
        .respond_to_invitation(&id("inv-1"), InvitationStatus::Accepted)
        .expect("pending invitation accepts");

    assert_eq!(response.invitation.status, InvitationStatus::Accepted);
    assert_eq!(response.advisory.title, "Invitation Accepted");
    assert_eq!(
        response.advisory.description,
        "You've accepted the invitation from Sarah Chen"
    );
}

#[test]
fn declining_uses_declined_wording() {
    let service = bundled_service(8);

    let response = service
        .respond_to_invitation(&id("inv-4"), InvitationStatus::Declined)
        .expect("pending invitation declines");

    assert_eq!(response.advisory.title, "Invitation Declined");
    assert_eq!(
        response.advisory.description,
        "You've declined the invitation from Emily Wang"
    );
}

#[test]
fn second_reply_is_rejected() {
    let service = bundled_service(8);
    service
        .respond_to_invitation(&id("inv-1"), InvitationStatus::Accepted)
        .expect("first reply");

    let err = service
        .respond_to_invitation(&id("inv-1"), InvitationStatus::Declined)
        .expect_err("already answered");

    match err {
        ListingServiceError::InvitationClosed { id: closed, status } => {
            assert_eq!(closed, id("inv-1"));
            assert_eq!(status, InvitationStatus::Accepted);
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn invitations_answered_in_the_catalog_are_closed() {
    let service = bundled_service(8);

    let err = service
        .respond_to_invitation(&id("inv-3"), InvitationStatus::Accepted)
        .expect_err("declined in catalog");

    assert_eq!(err.to_string(), "invitation 'inv-3' was already declined");
}

#[test]
fn pending_is_not_a_reply() {
    let service = bundled_service(8);

    let err = service
        .respond_to_invitation(&id("inv-1"), InvitationStatus::Pending)
        .expect_err("pending rejected");

    assert!(matches!(
        err,
        ListingServiceError::InvalidInvitationReply(InvitationStatus::Pending)
    ));
}

#[test]
fn unknown_invitation_is_reported() {
    let service = bundled_service(8);

    let err = service
        .respond_to_invitation(&id("inv-99"), InvitationStatus::Accepted)
        .expect_err("unknown id");

    assert!(matches!(err, ListingServiceError::InvitationNotFound(_)));
}

#[test]
fn replies_update_listing_and_counts() {
    let service = bundled_service(8);
    let before = service.invitations(&InvitationCriteria::default());
    assert_eq!(before.counts.count(InvitationStatus::Pending), 2);
    assert_eq!(before.counts.count(InvitationStatus::Accepted), 1);

    service
        .respond_to_invitation(&id("inv-1"), InvitationStatus::Accepted)
        .expect("reply recorded");

    let after = service.invitations(&InvitationCriteria::default());
    assert_eq!(after.counts.total, 4);
    assert_eq!(after.counts.count(InvitationStatus::Pending), 1);
    assert_eq!(after.counts.count(InvitationStatus::Accepted), 2);

    let accepted = service.invitations(
        &InvitationCriteria::default().with_status(Some(InvitationStatus::Accepted)),
    );
    let names: Vec<&str> = accepted
        .invitations
        .iter()
        .map(|invitation| invitation.mentor.name.as_str())
        .collect();
    assert_eq!(names, vec!["Sarah Chen", "Alex Rodriguez"]);
}
