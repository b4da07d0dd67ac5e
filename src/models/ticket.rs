use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::database::Database;
use crate::error::AppError;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ticket {
    pub id: i64,
    pub movie_id: i64,
    pub buyer_name: String,
    pub quantity: i32,
    pub purchased_at: NaiveDateTime,
}

impl Ticket {
    pub async fn list_for_movie(db: &Database, movie_id: i64) -> Result<Vec<Ticket>, AppError> {
        let tickets = sqlx::query_as::<_, Ticket>(
            "SELECT * FROM tickets WHERE movie_id = $1 ORDER BY purchased_at DESC",
        )
        .bind(movie_id)
        .fetch_all(&db.pool)
        .await?;
        Ok(tickets)
    }

    /// Buys `quantity` seats for a movie. The seat increment is a conditional
    /// update so two concurrent buyers cannot oversell: the row is only
    /// touched while enough seats remain, and the ticket insert shares the
    /// same transaction as the increment.
    pub async fn purchase(
        db: &Database,
        movie_id: i64,
        buyer_name: &str,
        quantity: i32,
    ) -> Result<Ticket, AppError> {
        if quantity <= 0 {
            return Err(AppError::InvalidQuantity);
        }

        let mut tx = db.pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE movies
             SET seats_sold = seats_sold + $2
             WHERE id = $1 AND seats_total - seats_sold >= $2",
        )
        .bind(movie_id)
        .bind(quantity)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            // Either the movie is gone or not enough seats remain; report
            // the exact availability in the latter case.
            let seats = sqlx::query_as::<_, (i32, i32)>(
                "SELECT seats_total, seats_sold FROM movies WHERE id = $1",
            )
            .bind(movie_id)
            .fetch_optional(&mut *tx)
            .await?;

            tx.rollback().await?;
            return match seats {
                Some((total, sold)) => Err(AppError::InsufficientSeats {
                    available: (total - sold).max(0),
                }),
                None => Err(AppError::NotFound),
            };
        }

        let ticket = sqlx::query_as::<_, Ticket>(
            "INSERT INTO tickets (movie_id, buyer_name, quantity)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(movie_id)
        .bind(buyer_name)
        .bind(quantity)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Purchases against a live database are covered by the handler flow; the
    // quantity gate is pure and checked here.
    #[tokio::test]
    async fn purchase_rejects_non_positive_quantity_before_touching_the_pool() {
        // A pool pointing nowhere: the quantity check must fail first.
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .expect("lazy pool");
        let db = Database { pool };

        for qty in [0, -1, -100] {
            let res = Ticket::purchase(&db, 1, "Ana", qty).await;
            assert!(matches!(res, Err(AppError::InvalidQuantity)));
        }
    }
}
