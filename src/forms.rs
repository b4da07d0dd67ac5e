//! Typed parsing of the raw (all-string) form bodies. Every handler accepts
//! the raw struct and converts it here before anything is persisted, so a bad
//! numeric field can never leave partial state behind.

use serde::Deserialize;
use thiserror::Error;

/// A form field that failed to parse. The handlers map the field name to the
/// user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid value for field '{field}'")]
pub struct FieldError {
    pub field: &'static str,
}

/* ---------- movie create/edit ---------- */

#[derive(Debug, Deserialize)]
pub struct RawMovieForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub seats_total: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieFields {
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub genre: String,
    /// None means "not supplied": create falls back to 100, edit keeps the
    /// stored value.
    pub seats_total: Option<i32>,
}

impl RawMovieForm {
    pub fn parse(self) -> Result<MovieFields, FieldError> {
        let duration: i32 = self
            .duration
            .trim()
            .parse()
            .map_err(|_| FieldError { field: "duration" })?;

        let seats_total = match self.seats_total.trim() {
            "" => None,
            s => Some(s.parse::<i32>().map_err(|_| FieldError {
                field: "seats_total",
            })?),
        };

        Ok(MovieFields {
            title: self.title.trim().to_string(),
            description: self.description,
            duration,
            genre: self.genre,
            seats_total,
        })
    }
}

/* ---------- ticket purchase ---------- */

#[derive(Debug, Deserialize)]
pub struct RawPurchaseForm {
    #[serde(default)]
    pub buyer_name: String,
    #[serde(default)]
    pub quantity: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseFields {
    pub buyer_name: String,
    pub quantity: i32,
}

impl RawPurchaseForm {
    pub fn parse(self) -> Result<PurchaseFields, FieldError> {
        let quantity = match self.quantity.trim() {
            // absent quantity buys a single seat
            "" => 1,
            s => s.parse::<i32>().map_err(|_| FieldError { field: "quantity" })?,
        };

        let buyer_name = match self.buyer_name.trim() {
            "" => "Anonimo".to_string(),
            name => name.to_string(),
        };

        Ok(PurchaseFields {
            buyer_name,
            quantity,
        })
    }
}

/* ---------- login ---------- */

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn movie_form(duration: &str, seats_total: &str) -> RawMovieForm {
        RawMovieForm {
            title: "  Dune  ".to_string(),
            description: "desert".to_string(),
            duration: duration.to_string(),
            genre: "Sci-Fi".to_string(),
            seats_total: seats_total.to_string(),
        }
    }

    #[test]
    fn movie_form_parses_and_trims() {
        let fields = movie_form("155", "200").parse().expect("valid form");
        assert_eq!(fields.title, "Dune");
        assert_eq!(fields.duration, 155);
        assert_eq!(fields.seats_total, Some(200));
    }

    #[test]
    fn movie_form_without_seats_total_leaves_the_default_open() {
        let fields = movie_form("90", "").parse().expect("valid form");
        assert_eq!(fields.seats_total, None);
    }

    #[test]
    fn movie_form_flags_a_bad_duration() {
        let err = movie_form("two hours", "100").parse().unwrap_err();
        assert_eq!(err.field, "duration");
    }

    #[test]
    fn movie_form_flags_bad_seats_total() {
        let err = movie_form("120", "muchos").parse().unwrap_err();
        assert_eq!(err.field, "seats_total");
    }

    #[test]
    fn purchase_form_defaults() {
        let fields = RawPurchaseForm {
            buyer_name: "   ".to_string(),
            quantity: String::new(),
        }
        .parse()
        .expect("valid form");
        assert_eq!(fields.buyer_name, "Anonimo");
        assert_eq!(fields.quantity, 1);
    }

    #[test]
    fn purchase_form_flags_a_bad_quantity() {
        let err = RawPurchaseForm {
            buyer_name: "Ana".to_string(),
            quantity: "dos".to_string(),
        }
        .parse()
        .unwrap_err();
        assert_eq!(err.field, "quantity");
    }

    #[test]
    fn purchase_form_accepts_negative_numbers_for_the_domain_to_reject() {
        // parsing is only about being an integer; the positivity rule lives
        // in the purchase operation
        let fields = RawPurchaseForm {
            buyer_name: "Leo".to_string(),
            quantity: "-3".to_string(),
        }
        .parse()
        .expect("integers parse");
        assert_eq!(fields.quantity, -3);
    }

    proptest! {
        #[test]
        fn movie_form_parsing_never_panics(
            duration in ".*",
            seats in ".*",
        ) {
            let _ = movie_form(&duration, &seats).parse();
        }

        #[test]
        fn quantity_digits_always_parse(q in 1..100_000i32) {
            let fields = RawPurchaseForm {
                buyer_name: "Ana".to_string(),
                quantity: q.to_string(),
            }
            .parse()
            .expect("digits parse");
            prop_assert_eq!(fields.quantity, q);
        }
    }
}
