use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::controllers::{with_message, FlashParams};
use crate::error::AppError;
use crate::forms::{FieldError, RawMovieForm};
use crate::middleware::SessionUser;
use crate::models::{Movie, Ticket};
use crate::views;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(list))
        .route("/movies/new", get(new_form).post(create))
        .route("/movies/{id}", get(detail))
        .route("/movies/{id}/edit", get(edit_form).post(update))
        .route("/movies/{id}/delete", post(delete))
        .route("/cartelera", get(cartelera))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(default)]
    q: String,
    msg: Option<String>,
    error: Option<String>,
}

async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    let movies = Movie::search(&state.db, &params.q).await?;
    let flash = FlashParams {
        msg: params.msg,
        error: params.error,
    };
    Ok(views::movies_list(&movies, &params.q, flash.as_flash()))
}

async fn cartelera(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let movies = Movie::list_newest(&state.db).await?;
    Ok(views::cartelera(&movies))
}

async fn detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(flash): Query<FlashParams>,
) -> Result<Html<String>, AppError> {
    let movie = Movie::find(&state.db, id).await?;
    let tickets = Ticket::list_for_movie(&state.db, id).await?;
    Ok(views::movie_detail(&movie, &tickets, flash.as_flash()))
}

/* ---------- admin: create / edit / delete ---------- */

async fn new_form(_user: SessionUser, Query(flash): Query<FlashParams>) -> Html<String> {
    views::movie_form(None, flash.as_flash())
}

fn numeric_error_message(err: FieldError, creating: bool) -> &'static str {
    if creating && err.field == "duration" {
        "Duración inválida"
    } else {
        "Campos numéricos inválidos"
    }
}

async fn create(
    State(state): State<Arc<AppState>>,
    _user: SessionUser,
    Form(raw): Form<RawMovieForm>,
) -> Result<Redirect, AppError> {
    let fields = match raw.parse() {
        Ok(fields) => fields,
        Err(e) => {
            return Ok(Redirect::to(&with_message(
                "/movies/new",
                "error",
                numeric_error_message(e, true),
            )))
        }
    };

    Movie::create(&state.db, &fields).await?;
    Ok(Redirect::to(&with_message(
        "/movies",
        "msg",
        "Película creada correctamente",
    )))
}

async fn edit_form(
    State(state): State<Arc<AppState>>,
    _user: SessionUser,
    Path(id): Path<i64>,
    Query(flash): Query<FlashParams>,
) -> Result<Html<String>, AppError> {
    let movie = Movie::find(&state.db, id).await?;
    Ok(views::movie_form(Some(&movie), flash.as_flash()))
}

async fn update(
    State(state): State<Arc<AppState>>,
    _user: SessionUser,
    Path(id): Path<i64>,
    Form(raw): Form<RawMovieForm>,
) -> Result<Redirect, AppError> {
    // unknown ids 404 before any validation, like the GET form
    Movie::find(&state.db, id).await?;

    let fields = match raw.parse() {
        Ok(fields) => fields,
        Err(e) => {
            return Ok(Redirect::to(&with_message(
                &format!("/movies/{}/edit", id),
                "error",
                numeric_error_message(e, false),
            )))
        }
    };

    Movie::update(&state.db, id, &fields).await?;
    Ok(Redirect::to(&with_message(
        "/movies",
        "msg",
        "Película actualizada",
    )))
}

async fn delete(
    State(state): State<Arc<AppState>>,
    _user: SessionUser,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    Movie::delete(&state.db, id).await?;
    Ok(Redirect::to(&with_message(
        "/movies",
        "msg",
        "Película eliminada",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_reports_a_bad_duration_specifically() {
        let err = FieldError { field: "duration" };
        assert_eq!(numeric_error_message(err, true), "Duración inválida");
    }

    #[test]
    fn other_numeric_failures_share_one_message() {
        let seats = FieldError {
            field: "seats_total",
        };
        let duration = FieldError { field: "duration" };
        assert_eq!(
            numeric_error_message(seats, true),
            "Campos numéricos inválidos"
        );
        assert_eq!(
            numeric_error_message(duration, false),
            "Campos numéricos inválidos"
        );
    }
}
