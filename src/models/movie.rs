use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::database::Database;
use crate::error::AppError;
use crate::forms::MovieFields;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub genre: String,
    pub seats_total: i32,
    pub seats_sold: i32,
    pub created_at: NaiveDateTime,
}

impl Movie {
    /// Seats still on sale. Never negative, even if seats_total was edited
    /// below the number already sold.
    pub fn seats_available(&self) -> i32 {
        (self.seats_total - self.seats_sold).max(0)
    }

    pub async fn find(db: &Database, id: i64) -> Result<Movie, AppError> {
        sqlx::query_as::<_, Movie>("SELECT * FROM movies WHERE id = $1")
            .bind(id)
            .fetch_optional(&db.pool)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn list_newest(db: &Database) -> Result<Vec<Movie>, AppError> {
        let movies = sqlx::query_as::<_, Movie>("SELECT * FROM movies ORDER BY created_at DESC")
            .fetch_all(&db.pool)
            .await?;
        Ok(movies)
    }

    /// Empty query lists everything newest-first; otherwise matches movies
    /// whose title or genre contains the query as a case-sensitive substring.
    pub async fn search(db: &Database, query: &str) -> Result<Vec<Movie>, AppError> {
        if query.is_empty() {
            return Self::list_newest(db).await;
        }
        let pattern = format!("%{}%", query);
        let movies = sqlx::query_as::<_, Movie>(
            "SELECT * FROM movies WHERE title LIKE $1 OR genre LIKE $1",
        )
        .bind(pattern)
        .fetch_all(&db.pool)
        .await?;
        Ok(movies)
    }

    pub async fn create(db: &Database, fields: &MovieFields) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO movies (title, description, duration, genre, seats_total)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.duration)
        .bind(&fields.genre)
        .bind(fields.seats_total.unwrap_or(100))
        .fetch_one(&db.pool)
        .await?;
        Ok(id)
    }

    /// Overwrites the editable fields in place. seats_sold and id are never
    /// touched; an absent seats_total keeps the current value.
    pub async fn update(db: &Database, id: i64, fields: &MovieFields) -> Result<(), AppError> {
        let res = sqlx::query(
            "UPDATE movies
             SET title = $2, description = $3, duration = $4, genre = $5,
                 seats_total = COALESCE($6, seats_total)
             WHERE id = $1",
        )
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.duration)
        .bind(&fields.genre)
        .bind(fields.seats_total)
        .execute(&db.pool)
        .await?;

        if res.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// Deletes the movie and all its tickets in one transaction. The tickets
    /// table keeps a plain foreign key, so the cascade is explicit here.
    pub async fn delete(db: &Database, id: i64) -> Result<(), AppError> {
        let mut tx = db.pool.begin().await?;

        sqlx::query("DELETE FROM tickets WHERE movie_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let res = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if res.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::NotFound);
        }

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn movie(seats_total: i32, seats_sold: i32) -> Movie {
        Movie {
            id: 1,
            title: "Dune".to_string(),
            description: String::new(),
            duration: 155,
            genre: "Sci-Fi".to_string(),
            seats_total,
            seats_sold,
            created_at: chrono::NaiveDateTime::default(),
        }
    }

    #[test]
    fn seats_available_subtracts_sold() {
        assert_eq!(movie(100, 37).seats_available(), 63);
    }

    #[test]
    fn seats_available_is_zero_when_sold_out() {
        assert_eq!(movie(2, 2).seats_available(), 0);
    }

    #[test]
    fn seats_available_never_goes_negative() {
        // seats_total can be edited below seats_sold after sales
        assert_eq!(movie(10, 25).seats_available(), 0);
    }

    proptest! {
        #[test]
        fn seats_available_matches_clamped_difference(
            total in 0..10_000i32,
            sold in 0..10_000i32,
        ) {
            let m = movie(total, sold);
            prop_assert_eq!(m.seats_available(), (total - sold).max(0));
            prop_assert!(m.seats_available() >= 0);
        }
    }
}
