//! Fluent assertions with expected/received output

use super::TestResponse;
use std::fmt::Debug;

/// Value under assertion, created by the `expect!` macro
pub struct Expect<T> {
    value: T,
    location: &'static str,
}

impl<T> Expect<T> {
    pub fn new(value: T, location: &'static str) -> Self {
        Self { value, location }
    }

    #[track_caller]
    fn fail(&self, matcher: &str, expected: impl Debug, received: impl Debug) -> ! {
        panic!(
            "\nassertion failed at {}\n  expect!(value).{}\n\n  Expected: {:?}\n  Received: {:?}\n",
            self.location, matcher, expected, received
        )
    }
}

impl<T: Debug + PartialEq> Expect<T> {
    pub fn to_equal(&self, expected: T) {
        if self.value != expected {
            self.fail("to_equal(expected)", &expected, &self.value);
        }
    }

    pub fn to_not_equal(&self, unexpected: T) {
        if self.value == unexpected {
            self.fail("to_not_equal(value)", format!("not {:?}", unexpected), &self.value);
        }
    }
}

impl Expect<bool> {
    pub fn to_be_true(&self) {
        if !self.value {
            self.fail("to_be_true()", true, false);
        }
    }

    pub fn to_be_false(&self) {
        if self.value {
            self.fail("to_be_false()", false, true);
        }
    }
}

impl<T: Debug> Expect<Option<T>> {
    pub fn to_be_some(&self) {
        if self.value.is_none() {
            self.fail("to_be_some()", "Some(_)", "None");
        }
    }

    pub fn to_be_none(&self) {
        if self.value.is_some() {
            self.fail("to_be_none()", "None", &self.value);
        }
    }
}

impl<T: Debug + PartialEq> Expect<Option<T>> {
    pub fn to_contain_value(&self, expected: T) {
        if self.value.as_ref() != Some(&expected) {
            self.fail("to_contain_value(expected)", Some(&expected), &self.value);
        }
    }
}

impl<T: Debug, E: Debug> Expect<Result<T, E>> {
    pub fn to_be_ok(&self) {
        if self.value.is_err() {
            self.fail("to_be_ok()", "Ok(_)", &self.value);
        }
    }

    pub fn to_be_err(&self) {
        if self.value.is_ok() {
            self.fail("to_be_err()", "Err(_)", &self.value);
        }
    }
}

impl<S: AsRef<str>> Expect<S> {
    /// Substring check for `String` and `&str`
    pub fn to_contain_str(&self, substring: &str) {
        let value = self.value.as_ref();
        if !value.contains(substring) {
            self.fail("to_contain_str(substring)", format!("*{}*", substring), value);
        }
    }
}

impl<T: Debug + PartialEq> Expect<Vec<T>> {
    pub fn to_have_length(&self, expected: usize) {
        if self.value.len() != expected {
            self.fail("to_have_length(n)", expected, self.value.len());
        }
    }

    pub fn to_contain(&self, item: &T) {
        if !self.value.contains(item) {
            self.fail("to_contain(item)", item, &self.value);
        }
    }

    pub fn to_be_empty(&self) {
        if !self.value.is_empty() {
            self.fail("to_be_empty()", "[]", &self.value);
        }
    }
}

impl<T: Debug + PartialOrd> Expect<T> {
    pub fn to_be_greater_than(&self, expected: T) {
        if !(self.value > expected) {
            self.fail("to_be_greater_than(expected)", format!("> {:?}", expected), &self.value);
        }
    }

    pub fn to_be_less_than(&self, expected: T) {
        if !(self.value < expected) {
            self.fail("to_be_less_than(expected)", format!("< {:?}", expected), &self.value);
        }
    }

    pub fn to_be_greater_than_or_equal(&self, expected: T) {
        if !(self.value >= expected) {
            self.fail(
                "to_be_greater_than_or_equal(expected)",
                format!(">= {:?}", expected),
                &self.value,
            );
        }
    }
}

// Envelope matchers
impl Expect<&TestResponse> {
    pub fn to_have_status(&self, expected: u16) {
        if self.value.status() != expected {
            self.fail("to_have_status(code)", expected, self.value.text());
        }
    }

    pub fn to_have_message(&self, expected: &str) {
        if self.value.message() != Some(expected) {
            self.fail("to_have_message(text)", expected, self.value.text());
        }
    }

    /// `success: true` in the envelope
    pub fn to_be_success(&self) {
        if self.value.success() != Some(true) {
            self.fail("to_be_success()", "success: true", self.value.text());
        }
    }

    pub fn to_be_failure(&self) {
        if self.value.success() != Some(false) {
            self.fail("to_be_failure()", "success: false", self.value.text());
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_passing_matchers() {
        crate::expect!(2 + 2).to_equal(4);
        crate::expect!(3).to_be_greater_than(2);
        crate::expect!(Some("a")).to_contain_value("a");
        crate::expect!(vec![1, 2, 3]).to_contain(&2);
        crate::expect!("Found 1 users").to_contain_str("1 users");
        crate::expect!(Ok::<u8, ()>(1)).to_be_ok();
    }

    #[test]
    #[should_panic(expected = "to_equal(expected)")]
    fn test_failing_matcher_reports_expected_and_received() {
        crate::expect!("mai").to_equal("thao");
    }
}
