//! Custom assertion macros
//!
//! Enhanced assertions with more descriptive failure output.

/// Assert that a result is ok and return the value
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a result is an error, optionally of a given shape
macro_rules! assert_err {
    ($result:expr) => {
        assert!($result.is_err(), "Expected Err, got Ok");
    };
    ($result:expr, $pattern:pat) => {
        match $result {
            Err($pattern) => {}
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => panic!("Expected different error variant, got: {:?}", e),
        }
    };
}

/// Assert an item's reaction and counters in one line
macro_rules! assert_engagement {
    ($engagement:expr, $reaction:expr, $likes:expr, $dislikes:expr) => {
        let engagement = $engagement;
        assert_eq!(
            (engagement.reaction, engagement.likes, engagement.dislikes),
            ($reaction, $likes, $dislikes),
            "unexpected engagement"
        );
    };
}

/// Assert that a list of ids has no duplicates
macro_rules! assert_unique_ids {
    ($items:expr) => {
        let mut seen = std::collections::HashSet::new();
        for item in $items.iter() {
            assert!(seen.insert(item.id.clone()), "duplicate id {}", item.id);
        }
    };
}
