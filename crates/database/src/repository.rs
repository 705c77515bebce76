use crate::DbError;
use crate::connection::open_connection;
use core_types::{NewRace, Race};
use sqlx::Connection;
use sqlx::sqlite::SqliteConnectOptions;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the store. It encapsulates all SQL queries and data access logic.
///
/// It holds connection settings, not connections: each call opens its own
/// connection and closes it before returning.
#[derive(Debug, Clone)]
pub struct DbRepository {
    options: SqliteConnectOptions,
}

impl DbRepository {
    /// Creates a new `DbRepository` for an already initialized store.
    pub fn new(options: SqliteConnectOptions) -> Self {
        Self { options }
    }

    /// Inserts one race and returns the id the store assigned to it.
    pub async fn insert_race(&self, race: &NewRace) -> Result<i64, DbError> {
        let mut conn = open_connection(&self.options).await?;
        let result = sqlx::query(
            r#"
            INSERT INTO races (date, event_name, city, country, distance_label, time_str)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&race.date)
        .bind(&race.event_name)
        .bind(&race.city)
        .bind(&race.country)
        .bind(&race.distance_label)
        .bind(&race.time_str)
        .execute(&mut conn)
        .await?;
        conn.close().await?;

        Ok(result.last_insert_rowid())
    }

    /// Fetches every race, oldest first.
    pub async fn list_races(&self) -> Result<Vec<Race>, DbError> {
        let mut conn = open_connection(&self.options).await?;
        let races = sqlx::query_as::<_, Race>(
            r#"
            SELECT id, date, event_name, city, country, distance_label, time_str
            FROM races
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        Ok(races)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{connect_options, init_schema};
    use tempfile::TempDir;

    async fn setup() -> (TempDir, DbRepository) {
        let dir = TempDir::new().unwrap();
        let options = connect_options(&dir.path().join("races.db")).await.unwrap();
        init_schema(&options).await.unwrap();
        (dir, DbRepository::new(options))
    }

    fn new_race(event_name: &str) -> NewRace {
        NewRace {
            date: "2024-05-01".to_string(),
            event_name: event_name.to_string(),
            city: "Springfield".to_string(),
            country: "USA".to_string(),
            distance_label: "10K".to_string(),
            time_str: "0:45:10".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let (_dir, repo) = setup().await;
        assert!(repo.list_races().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_then_list() {
        let (_dir, repo) = setup().await;

        let id = repo.insert_race(&new_race("City Run")).await.unwrap();
        assert_eq!(id, 1);

        let races = repo.list_races().await.unwrap();
        assert_eq!(
            races,
            vec![Race {
                id: 1,
                date: "2024-05-01".to_string(),
                event_name: "City Run".to_string(),
                city: "Springfield".to_string(),
                country: "USA".to_string(),
                distance_label: "10K".to_string(),
                time_str: "0:45:10".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let (_dir, repo) = setup().await;

        let mut ids = Vec::new();
        for name in ["First", "Second", "Third"] {
            ids.push(repo.insert_race(&new_race(name)).await.unwrap());
        }
        assert!(ids.windows(2).all(|w| w[0] < w[1]));

        let names: Vec<String> = repo
            .list_races()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.event_name)
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn test_listing_is_repeatable() {
        let (_dir, repo) = setup().await;
        repo.insert_race(&new_race("City Run")).await.unwrap();

        let first = repo.list_races().await.unwrap();
        let second = repo.list_races().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let (_dir, repo) = setup().await;
        repo.insert_race(&new_race("One")).await.unwrap();
        let second = repo.insert_race(&new_race("Two")).await.unwrap();

        // Out-of-band delete; the service itself has no delete path.
        let mut conn = open_connection(&repo.options).await.unwrap();
        sqlx::query("DELETE FROM races WHERE id = ?1")
            .bind(second)
            .execute(&mut conn)
            .await
            .unwrap();
        conn.close().await.unwrap();

        let third = repo.insert_race(&new_race("Three")).await.unwrap();
        assert!(third > second);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_get_unique_ids() {
        let (_dir, repo) = setup().await;

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.insert_race(&new_race(&format!("Run {i}"))).await })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap().unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8);
        assert_eq!(repo.list_races().await.unwrap().len(), 8);
    }
}
