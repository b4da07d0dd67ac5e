use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::get,
    Form, Router,
};
use std::sync::Arc;

use crate::controllers::{with_message, FlashParams};
use crate::error::AppError;
use crate::forms::RawPurchaseForm;
use crate::models::{Movie, Ticket};
use crate::views;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/movies/{id}/buy", get(buy_form).post(buy))
}

async fn buy_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(flash): Query<FlashParams>,
) -> Result<Html<String>, AppError> {
    let movie = Movie::find(&state.db, id).await?;
    Ok(views::buy_form(&movie, flash.as_flash()))
}

/// The recoverable purchase failures, mapped to the message shown back on the
/// purchase form. Unknown movie and database faults stay hard errors.
fn rejection_message(err: &AppError) -> Option<String> {
    match err {
        AppError::InvalidQuantity => Some("La cantidad debe ser positiva".to_string()),
        AppError::InsufficientSeats { available } => Some(format!(
            "Sólo quedan {} asientos disponibles",
            available
        )),
        _ => None,
    }
}

async fn buy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Form(raw): Form<RawPurchaseForm>,
) -> Result<Redirect, AppError> {
    // unknown ids 404 before any validation, like the GET form
    Movie::find(&state.db, id).await?;

    let back = format!("/movies/{}/buy", id);

    let fields = match raw.parse() {
        Ok(fields) => fields,
        Err(_) => {
            return Ok(Redirect::to(&with_message(
                &back,
                "error",
                "Cantidad inválida",
            )))
        }
    };

    match Ticket::purchase(&state.db, id, &fields.buyer_name, fields.quantity).await {
        Ok(_) => Ok(Redirect::to(&with_message(
            &format!("/movies/{}", id),
            "msg",
            "Compra realizada con éxito",
        ))),
        Err(err) => match rejection_message(&err) {
            Some(message) => Ok(Redirect::to(&with_message(&back, "error", &message))),
            None => Err(err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_seats_names_the_exact_remainder() {
        let msg = rejection_message(&AppError::InsufficientSeats { available: 0 });
        assert_eq!(
            msg.as_deref(),
            Some("Sólo quedan 0 asientos disponibles")
        );
    }

    #[test]
    fn non_positive_quantity_gets_its_own_message() {
        let msg = rejection_message(&AppError::InvalidQuantity);
        assert_eq!(msg.as_deref(), Some("La cantidad debe ser positiva"));
    }

    #[test]
    fn unknown_movie_stays_a_hard_404() {
        assert!(rejection_message(&AppError::NotFound).is_none());
    }
}
