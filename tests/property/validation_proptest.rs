//! Property tests for input validation
//!
//! Drafts are checked against generated input: accepted values come back
//! trimmed and within bounds, rejected values name the offending field.

use proptest::prelude::*;
use snapshare::shared::photo::{MAX_COMMENT_LEN, MAX_TITLE_LEN};
use snapshare::shared::{CommentDraft, PhotoDraft, SharedError};

#[cfg(feature = "ssr")]
use snapshare::backend::auth::users::is_valid_username;

fn rejected_field(err: SharedError) -> String {
    match err {
        SharedError::ValidationError { field, .. } => field,
        other => panic!("expected a validation error, got {:?}", other),
    }
}

proptest! {
    #[test]
    fn comment_body_is_trimmed(body in "[a-zA-Z0-9 .,!?]{0,80}", pad in " {0,4}") {
        let draft = CommentDraft { body: Some(format!("{pad}{body}{pad}")) };
        match draft.validate() {
            Ok(comment) => {
                prop_assert_eq!(comment.body(), body.trim());
                prop_assert!(!comment.body().is_empty());
                prop_assert_eq!(comment.author(), None::<&str>);
            }
            Err(err) => {
                prop_assert!(body.trim().is_empty());
                prop_assert_eq!(rejected_field(err), "body");
            }
        }
    }

    #[test]
    fn comment_body_length_is_bounded(extra in 1usize..50) {
        let draft = CommentDraft { body: Some("c".repeat(MAX_COMMENT_LEN + extra)) };
        prop_assert_eq!(rejected_field(draft.validate().unwrap_err()), "body");
    }

    #[test]
    fn photo_title_length_is_bounded(len in 1usize..(MAX_TITLE_LEN + 40)) {
        let draft = PhotoDraft {
            title: Some("t".repeat(len)),
            image_url: Some("/images/p.jpg".to_string()),
            description: None,
        };
        match draft.validate() {
            Ok(photo) => {
                prop_assert!(len <= MAX_TITLE_LEN);
                prop_assert_eq!(photo.title().len(), len);
            }
            Err(err) => {
                prop_assert!(len > MAX_TITLE_LEN);
                prop_assert_eq!(rejected_field(err), "title");
            }
        }
    }

    #[test]
    fn photo_image_url_needs_known_prefix(path in "[a-z]{1,20}\\.(jpg|png)") {
        let accepted = ["https://example.com/", "http://example.com/", "/images/"];
        for prefix in accepted {
            let draft = PhotoDraft {
                title: Some("Title".to_string()),
                image_url: Some(format!("{prefix}{path}")),
                description: None,
            };
            prop_assert!(draft.validate().is_ok());
        }

        let draft = PhotoDraft {
            title: Some("Title".to_string()),
            image_url: Some(format!("ftp://example.com/{path}")),
            description: None,
        };
        prop_assert_eq!(rejected_field(draft.validate().unwrap_err()), "image_url");
    }

    #[test]
    fn blank_description_is_absent(spaces in " {0,10}") {
        let draft = PhotoDraft {
            title: Some("Title".to_string()),
            image_url: Some("/images/p.jpg".to_string()),
            description: Some(spaces),
        };
        let validated = draft.validate().unwrap();
        prop_assert_eq!(validated.description(), None::<&str>);
    }
}

#[cfg(feature = "ssr")]
proptest! {
    #[test]
    fn well_formed_usernames_are_accepted(name in "[a-zA-Z][a-zA-Z0-9_]{2,29}") {
        prop_assert!(is_valid_username(&name));
    }

    #[test]
    fn usernames_starting_with_non_letter_are_rejected(name in "[0-9_][a-zA-Z0-9_]{2,29}") {
        prop_assert!(!is_valid_username(&name));
    }

    #[test]
    fn usernames_with_other_characters_are_rejected(
        head in "[a-z]{2,10}",
        bad in "[ !@#$%^&*()\\-]",
        tail in "[a-z]{0,10}",
    ) {
        let name = format!("{head}{bad}{tail}");
        prop_assert!(!is_valid_username(&name));
    }
}
