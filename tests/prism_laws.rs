//! Property-based tests for Prism laws.
//!
//! Verifies that prism implementations satisfy the required laws:
//!
//! - **PreviewReview Law**: `prism.preview(&prism.review(value)) == Some(value)`
//! - **ReviewPreview Law**: if preview succeeds, reviewing the extracted
//!   value reconstructs the original source

use proptest::prelude::*;
use uniflow::optics::{Prism, some};
use uniflow::prism;

#[derive(Clone, PartialEq, Debug)]
enum Event {
    Message(String),
    Code(i64),
    Shutdown,
}

fn arbitrary_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        "[a-z]{0,12}".prop_map(Event::Message),
        any::<i64>().prop_map(Event::Code),
        Just(Event::Shutdown),
    ]
}

proptest! {
    /// PreviewReview Law for the Message variant.
    #[test]
    fn prop_message_preview_review_law(text in "[a-z]{0,12}") {
        let message = prism!(Event, Message);
        prop_assert_eq!(message.preview(&message.review(text.clone())), Some(text));
    }

    /// PreviewReview Law for the Code variant.
    #[test]
    fn prop_code_preview_review_law(code in any::<i64>()) {
        let code_prism = prism!(Event, Code);
        prop_assert_eq!(code_prism.preview(&code_prism.review(code)), Some(code));
    }

    /// ReviewPreview Law: a successful preview reviews back to the source.
    #[test]
    fn prop_review_preview_law(event in arbitrary_event()) {
        let message = prism!(Event, Message);
        if let Some(text) = message.preview(&event) {
            prop_assert_eq!(message.review(text), event);
        }
    }

    /// A prism for one variant never matches another.
    #[test]
    fn prop_prism_is_partial(code in any::<i64>()) {
        let message = prism!(Event, Message);
        prop_assert_eq!(message.preview(&Event::Code(code)), None);
        prop_assert_eq!(message.preview(&Event::Shutdown), None);
    }

    /// PreviewReview Law for the Option prism.
    #[test]
    fn prop_some_preview_review_law(value in any::<i32>()) {
        let present = some::<i32>();
        prop_assert_eq!(present.preview(&present.review(value)), Some(value));
    }

    /// PreviewReview Law for a composed prism.
    #[test]
    fn prop_composed_preview_review_law(value in any::<i32>()) {
        #[derive(Clone, PartialEq, Debug)]
        enum Outer {
            Inner(Option<i32>),
            Nothing,
        }

        let inner_value = prism!(Outer, Inner).compose(some::<i32>());
        prop_assert_eq!(inner_value.preview(&inner_value.review(value)), Some(value));
        prop_assert_eq!(inner_value.preview(&Outer::Inner(None)), None);
        prop_assert_eq!(inner_value.preview(&Outer::Nothing), None);
    }

    /// modify_or_identity leaves non-matching sources untouched.
    #[test]
    fn prop_modify_or_identity_on_no_match(event in arbitrary_event()) {
        let code_prism = prism!(Event, Code);
        let modified = code_prism.modify_or_identity(event.clone(), |code| code.wrapping_add(1));
        match event {
            Event::Code(code) => prop_assert_eq!(modified, Event::Code(code.wrapping_add(1))),
            other => prop_assert_eq!(modified, other),
        }
    }
}
