//! HTML rendering. Views are plain functions from model data to a complete
//! page; everything user-supplied goes through `escape` on the way out.

use axum::response::Html;

use crate::models::{Movie, Ticket};

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// A one-shot status message carried in the redirect query string.
#[derive(Debug, Clone, Copy)]
pub enum Flash<'a> {
    Success(&'a str),
    Error(&'a str),
}

fn flash_block(flash: Option<Flash<'_>>) -> String {
    match flash {
        Some(Flash::Success(msg)) => {
            format!("<p class=\"flash success\">{}</p>", escape(msg))
        }
        Some(Flash::Error(msg)) => format!("<p class=\"flash error\">{}</p>", escape(msg)),
        None => String::new(),
    }
}

fn layout(title: &str, flash: Option<Flash<'_>>, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} - Cine ABM</title>\n</head>\n<body>\n\
         <nav><a href=\"/\">Inicio</a> | <a href=\"/movies\">Películas</a> | \
         <a href=\"/cartelera\">Cartelera</a> | <a href=\"/login\">Admin</a></nav>\n\
         {flash}\n<main>\n{body}\n</main>\n</body>\n</html>",
        title = escape(title),
        flash = flash_block(flash),
        body = body,
    ))
}

pub fn index() -> Html<String> {
    layout(
        "Inicio",
        None,
        "<h1>Cine ABM</h1>\n\
         <p>Gestión de películas y venta de entradas.</p>\n\
         <p><a href=\"/cartelera\">Ver la cartelera</a></p>",
    )
}

pub fn login_page(flash: Option<Flash<'_>>) -> Html<String> {
    layout(
        "Ingresar",
        flash,
        "<h1>Ingresar</h1>\n\
         <form method=\"post\" action=\"/login\">\n\
         <label>Usuario <input name=\"username\"></label>\n\
         <label>Contraseña <input type=\"password\" name=\"password\"></label>\n\
         <button type=\"submit\">Entrar</button>\n</form>",
    )
}

fn movie_row(movie: &Movie) -> String {
    format!(
        "<tr><td><a href=\"/movies/{id}\">{title}</a></td><td>{genre}</td>\
         <td>{duration} min</td><td>{available}</td>\
         <td><a href=\"/movies/{id}/buy\">Comprar</a> \
         <a href=\"/movies/{id}/edit\">Editar</a></td></tr>",
        id = movie.id,
        title = escape(&movie.title),
        genre = escape(&movie.genre),
        duration = movie.duration,
        available = movie.seats_available(),
    )
}

pub fn movies_list(movies: &[Movie], query: &str, flash: Option<Flash<'_>>) -> Html<String> {
    let rows: String = movies.iter().map(|m| movie_row(m)).collect();
    let body = format!(
        "<h1>Películas</h1>\n\
         <form method=\"get\" action=\"/movies\">\
         <input name=\"q\" value=\"{q}\" placeholder=\"Título o género\">\
         <button type=\"submit\">Buscar</button></form>\n\
         <p><a href=\"/movies/new\">Nueva película</a></p>\n\
         <table>\n<tr><th>Título</th><th>Género</th><th>Duración</th>\
         <th>Asientos disponibles</th><th></th></tr>\n{rows}\n</table>",
        q = escape(query),
        rows = rows,
    );
    layout("Películas", flash, &body)
}

pub fn cartelera(movies: &[Movie]) -> Html<String> {
    let items: String = movies
        .iter()
        .map(|m| {
            format!(
                "<li><a href=\"/movies/{id}\">{title}</a> ({genre}, {duration} min) — \
                 {available} asientos disponibles</li>",
                id = m.id,
                title = escape(&m.title),
                genre = escape(&m.genre),
                duration = m.duration,
                available = m.seats_available(),
            )
        })
        .collect();
    let body = format!("<h1>Cartelera</h1>\n<ul>\n{}\n</ul>", items);
    layout("Cartelera", None, &body)
}

/// Create and edit share the form; `movie` pre-fills it for edit.
pub fn movie_form(movie: Option<&Movie>, flash: Option<Flash<'_>>) -> Html<String> {
    let (action_label, target) = match movie {
        Some(m) => ("Editar", format!("/movies/{}/edit", m.id)),
        None => ("Crear", "/movies/new".to_string()),
    };
    let value = |f: fn(&Movie) -> String| movie.map(f).unwrap_or_default();
    let body = format!(
        "<h1>{action} película</h1>\n\
         <form method=\"post\" action=\"{target}\">\n\
         <label>Título <input name=\"title\" value=\"{title}\" required></label>\n\
         <label>Descripción <textarea name=\"description\">{description}</textarea></label>\n\
         <label>Duración (minutos) <input name=\"duration\" value=\"{duration}\"></label>\n\
         <label>Género <input name=\"genre\" value=\"{genre}\"></label>\n\
         <label>Asientos totales <input name=\"seats_total\" value=\"{seats_total}\"></label>\n\
         <button type=\"submit\">{action}</button>\n</form>",
        action = action_label,
        target = target,
        title = value(|m| escape(&m.title)),
        description = value(|m| escape(&m.description)),
        duration = value(|m| m.duration.to_string()),
        genre = value(|m| escape(&m.genre)),
        seats_total = value(|m| m.seats_total.to_string()),
    );
    layout(action_label, flash, &body)
}

pub fn movie_detail(
    movie: &Movie,
    tickets: &[Ticket],
    flash: Option<Flash<'_>>,
) -> Html<String> {
    let ticket_rows: String = tickets
        .iter()
        .map(|t| {
            format!(
                "<li>{buyer} — {quantity} entrada(s)</li>",
                buyer = escape(&t.buyer_name),
                quantity = t.quantity,
            )
        })
        .collect();
    let body = format!(
        "<h1>{title}</h1>\n\
         <p>{description}</p>\n\
         <p>Género: {genre} | Duración: {duration} min</p>\n\
         <p>Asientos disponibles: {available} de {total}</p>\n\
         <p><a href=\"/movies/{id}/buy\">Comprar entradas</a></p>\n\
         <form method=\"post\" action=\"/movies/{id}/delete\">\
         <button type=\"submit\">Eliminar</button></form>\n\
         <h2>Entradas vendidas</h2>\n<ul>\n{tickets}\n</ul>",
        id = movie.id,
        title = escape(&movie.title),
        description = escape(&movie.description),
        genre = escape(&movie.genre),
        duration = movie.duration,
        available = movie.seats_available(),
        total = movie.seats_total,
        tickets = ticket_rows,
    );
    layout(&movie.title, flash, &body)
}

pub fn buy_form(movie: &Movie, flash: Option<Flash<'_>>) -> Html<String> {
    let body = format!(
        "<h1>Comprar entradas: {title}</h1>\n\
         <p>Asientos disponibles: {available}</p>\n\
         <form method=\"post\" action=\"/movies/{id}/buy\">\n\
         <label>Nombre <input name=\"buyer_name\" placeholder=\"Anonimo\"></label>\n\
         <label>Cantidad <input name=\"quantity\" value=\"1\"></label>\n\
         <button type=\"submit\">Comprar</button>\n</form>",
        id = movie.id,
        title = escape(&movie.title),
        available = movie.seats_available(),
    );
    layout("Comprar", flash, &body)
}
