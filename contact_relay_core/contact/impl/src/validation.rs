use std::ops::RangeInclusive;

use contact_relay_models::{
    contact::{ContactField, ContactRule, ContactSubmission, ContactViolation},
    email_address::EmailAddress,
};

pub const NAME_LENGTH: RangeInclusive<usize> = 3..=50;
pub const EMAIL_LENGTH: RangeInclusive<usize> = 5..=100;
pub const MESSAGE_LENGTH: RangeInclusive<usize> = 10..=400;

/// Check every rule of every field and collect all violations in field
/// order. An empty field only reports that it is required.
pub fn validate(submission: &ContactSubmission) -> Vec<ContactViolation> {
    let mut violations = Vec::new();
    let mut violation = |field, rule, message| {
        violations.push(ContactViolation {
            field,
            rule,
            message,
        })
    };

    let name = submission.name.as_str();
    if name.is_empty() {
        violation(ContactField::Name, ContactRule::Required, "No name.");
    } else if !NAME_LENGTH.contains(&char_count(name)) {
        violation(
            ContactField::Name,
            ContactRule::Length,
            "Name must be 3-50 characters.",
        );
    }

    let email = submission.email.as_str();
    if email.is_empty() {
        violation(ContactField::Email, ContactRule::Required, "No email.");
    } else {
        if !is_email(email) {
            violation(
                ContactField::Email,
                ContactRule::Format,
                "Invalid email address.",
            );
        }
        if !EMAIL_LENGTH.contains(&char_count(email)) {
            violation(
                ContactField::Email,
                ContactRule::Length,
                "Email must be 5-100 characters.",
            );
        }
    }

    let message = submission.message.as_str();
    if message.is_empty() {
        violation(ContactField::Message, ContactRule::Required, "No message.");
    } else if !MESSAGE_LENGTH.contains(&char_count(message)) {
        violation(
            ContactField::Message,
            ContactRule::Length,
            "Message must be 10-400 characters.",
        );
    }

    violations
}

/// Accept only addresses whose domain is a dotted host name ending in an
/// alphabetic (or punycode) top level domain. IP literals and single label
/// hosts like `localhost` are rejected.
fn is_email(value: &str) -> bool {
    let Ok(address) = value.parse::<EmailAddress>() else {
        return false;
    };

    let labels = address.0.domain().split('.').collect::<Vec<_>>();
    let Some((tld, hosts)) = labels.split_last() else {
        return false;
    };

    let tld_valid = tld.starts_with("xn--")
        || (tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic));
    let hosts_valid = !hosts.is_empty()
        && hosts.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_alphanumeric() || c == '-')
        });

    tld_valid && hosts_valid
}

fn char_count(value: &str) -> usize {
    value.chars().count()
}

#[cfg(test)]
mod tests {
    use contact_relay_models::contact::{
        ContactEmail, ContactMessage, ContactName, ContactTelegram,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn submission(name: &str, email: &str, message: &str) -> ContactSubmission {
        ContactSubmission {
            name: ContactName::new(String::from(name)),
            telegram: ContactTelegram::new(String::from("@ann")),
            email: ContactEmail::new(String::from(email)),
            message: ContactMessage::new(String::from(message)),
        }
    }

    fn rules(violations: &[ContactViolation]) -> Vec<(ContactField, ContactRule)> {
        violations.iter().map(|v| (v.field, v.rule)).collect()
    }

    #[test]
    fn valid() {
        let result = validate(&submission(
            "Ann Lee",
            "ann@example.com",
            "Hello, I would like to get in touch.",
        ));
        assert!(result.is_empty(), "{result:?}");
    }

    #[test]
    fn name_length() {
        let result = validate(&submission("Al", "ann@example.com", "Hello there!"));
        assert_eq!(
            result,
            [ContactViolation {
                field: ContactField::Name,
                rule: ContactRule::Length,
                message: "Name must be 3-50 characters.",
            }]
        );

        let result = validate(&submission("Ann", "ann@example.com", "Hello there!"));
        assert!(result.is_empty(), "{result:?}");

        let result = validate(&submission(&"x".repeat(50), "ann@example.com", "Hello there!"));
        assert!(result.is_empty(), "{result:?}");

        let result = validate(&submission(&"x".repeat(51), "ann@example.com", "Hello there!"));
        assert_eq!(rules(&result), [(ContactField::Name, ContactRule::Length)]);
    }

    #[test]
    fn name_length_counts_normalized_characters() {
        let result = validate(&submission("  A    l  ", "ann@example.com", "Hello there!"));
        assert!(result.is_empty(), "{result:?}");

        let result = validate(&submission("Äö", "ann@example.com", "Hello there!"));
        assert_eq!(rules(&result), [(ContactField::Name, ContactRule::Length)]);
    }

    #[test]
    fn email_format() {
        let result = validate(&submission("Ann", "not-an-email", "Hello there!"));
        assert_eq!(
            result,
            [ContactViolation {
                field: ContactField::Email,
                rule: ContactRule::Format,
                message: "Invalid email address.",
            }]
        );

        let result = validate(&submission("Ann", "a@b.co", "Hello there!"));
        assert!(result.is_empty(), "{result:?}");
    }

    #[test]
    fn email_format_requires_domain_with_tld() {
        for email in [
            "ann@localhost",
            "ann@x",
            "ann@example",
            "a@[127.0.0.1]",
            "ann@127.0.0.1",
            "ann@example.c",
            "ann@example.123",
            "ann@-example.com",
            "ann@exa_mple.com",
        ] {
            let result = validate(&submission("Ann", email, "Hello there!"));
            assert_eq!(
                rules(&result),
                [(ContactField::Email, ContactRule::Format)],
                "{email:?}"
            );
        }

        for email in [
            "ann@mail.example.com",
            "max.mustermann@example.de",
            "ann@example.xn--p1ai",
        ] {
            let result = validate(&submission("Ann", email, "Hello there!"));
            assert!(result.is_empty(), "{email:?}: {result:?}");
        }
    }

    #[test]
    fn email_format_and_length() {
        let result = validate(&submission("Ann", "a b", "Hello there!"));
        assert_eq!(
            rules(&result),
            [
                (ContactField::Email, ContactRule::Format),
                (ContactField::Email, ContactRule::Length),
            ]
        );

        let long = format!("ann@{}.{}.com", "x".repeat(50), "y".repeat(50));
        let result = validate(&submission("Ann", &long, "Hello there!"));
        assert_eq!(rules(&result), [(ContactField::Email, ContactRule::Length)]);
    }

    #[test]
    fn message_length() {
        let result = validate(&submission("Ann", "ann@example.com", "123456789"));
        assert_eq!(
            result,
            [ContactViolation {
                field: ContactField::Message,
                rule: ContactRule::Length,
                message: "Message must be 10-400 characters.",
            }]
        );

        let result = validate(&submission("Ann", "ann@example.com", "1234567890"));
        assert!(result.is_empty(), "{result:?}");

        let result = validate(&submission("Ann", "ann@example.com", &"x".repeat(400)));
        assert!(result.is_empty(), "{result:?}");

        let result = validate(&submission("Ann", "ann@example.com", &"x".repeat(401)));
        assert_eq!(rules(&result), [(ContactField::Message, ContactRule::Length)]);
    }

    #[test]
    fn message_length_after_sanitization() {
        let result = validate(&submission("Ann", "ann@example.com", "  1234    5678  "));
        assert_eq!(rules(&result), [(ContactField::Message, ContactRule::Length)]);
    }

    #[test]
    fn required() {
        let result = validate(&submission("   ", "", "\n\t"));
        assert_eq!(
            result,
            [
                ContactViolation {
                    field: ContactField::Name,
                    rule: ContactRule::Required,
                    message: "No name.",
                },
                ContactViolation {
                    field: ContactField::Email,
                    rule: ContactRule::Required,
                    message: "No email.",
                },
                ContactViolation {
                    field: ContactField::Message,
                    rule: ContactRule::Required,
                    message: "No message.",
                },
            ]
        );
    }

    #[test]
    fn telegram_is_never_validated() {
        let mut sub = submission("Ann", "ann@example.com", "Hello there!");
        sub.telegram = ContactTelegram::new(String::new());
        assert!(validate(&sub).is_empty());

        sub.telegram = ContactTelegram::new("x".repeat(1000));
        assert!(validate(&sub).is_empty());
    }

    #[test]
    fn reports_all_fields_in_order() {
        let result = validate(&submission("Al", "not-an-email", "short"));
        assert_eq!(
            rules(&result),
            [
                (ContactField::Name, ContactRule::Length),
                (ContactField::Email, ContactRule::Format),
                (ContactField::Message, ContactRule::Length),
            ]
        );
    }
}
