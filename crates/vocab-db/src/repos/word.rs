//! Word repository — transactional CRUD over `words` + `word_definitions`.
//!
//! Every write touches both tables inside one transaction: no partial word,
//! no partial definition set is ever visible. Reads use the two-query batch
//! strategy (one query for word rows, one IN-clause query for all their
//! definitions), so the query count stays flat regardless of page size.

use std::collections::HashMap;

use chrono::Utc;

use vocab_core::entities::{Word, WordDefinition};
use vocab_core::ids::{PREFIX_DEFINITION, PREFIX_WORD};

use crate::VocabDb;
use crate::drafts::{DefinitionDraft, WordDraft};
use crate::error::DatabaseError;
use crate::filter::{SearchCondition, SearchFilter, WORD_COLUMNS, where_clause};
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_string_map, parse_string_vec};

const WORD_COLS: &str = "id, word, familiarity, created_at, updated_at";

const DEFINITION_COLS: &str =
    "id, word_id, part_of_speech, definition, phonetics, examples, notes, created_at, updated_at";

fn row_to_word(row: &libsql::Row) -> Result<Word, DatabaseError> {
    Ok(Word {
        id: row.get(0)?,
        word: row.get(1)?,
        familiarity: parse_enum(&row.get::<String>(2)?)?,
        definitions: Vec::new(),
        created_at: parse_datetime(&row.get::<String>(3)?)?,
        updated_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

fn row_to_definition(row: &libsql::Row) -> Result<WordDefinition, DatabaseError> {
    Ok(WordDefinition {
        id: row.get(0)?,
        word_id: row.get(1)?,
        part_of_speech: get_opt_string(row, 2)?,
        definition: row.get(3)?,
        phonetics: parse_string_map(row.get::<Option<String>>(4)?.as_deref())?,
        examples: parse_string_vec(row.get::<Option<String>>(5)?.as_deref())?,
        notes: get_opt_string(row, 6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl VocabDb {
    /// Insert a word and its definitions in one transaction.
    ///
    /// Familiarity defaults to red and timestamps to now. Generated IDs are
    /// captured onto the returned entity. Any failure rolls back the whole
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any statement fails; nothing is persisted
    /// in that case.
    pub async fn insert_word(&self, draft: WordDraft) -> Result<Word, DatabaseError> {
        let now = Utc::now();
        let familiarity = draft.familiarity.unwrap_or_default();

        let word_id = self.generate_id(PREFIX_WORD).await?;
        let mut definition_ids = Vec::with_capacity(draft.definitions.len());
        for _ in &draft.definitions {
            definition_ids.push(self.generate_id(PREFIX_DEFINITION).await?);
        }

        let tx = self.conn().transaction().await?;
        tx.execute(
            "INSERT INTO words (id, word, familiarity, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            libsql::params![
                word_id.as_str(),
                draft.word.as_str(),
                familiarity.as_str(),
                now.to_rfc3339(),
                now.to_rfc3339()
            ],
        )
        .await?;

        let mut definitions = Vec::with_capacity(draft.definitions.len());
        for (definition_draft, id) in draft.definitions.iter().zip(&definition_ids) {
            insert_definition(&tx, id, &word_id, definition_draft, &now.to_rfc3339()).await?;
            definitions.push(materialize_definition(
                id.clone(),
                word_id.clone(),
                definition_draft.clone(),
                now,
            ));
        }

        tx.commit().await?;

        Ok(Word {
            id: word_id,
            word: draft.word,
            familiarity,
            definitions,
            created_at: now,
            updated_at: now,
        })
    }

    /// Select words matching `filter`, with SQL-level limit/offset, and
    /// attach each word's definitions in insertion order.
    ///
    /// Exactly two queries regardless of page size: one for word rows, one
    /// batched IN-clause query for all definitions of the retrieved IDs.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidFilter` for non-allowlisted filter
    /// columns, or `DatabaseError` on query failure.
    pub async fn select_words(
        &self,
        filter: &SearchFilter,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Word>, DatabaseError> {
        let (clause, params) = where_clause(filter, WORD_COLUMNS, 1)?;
        let sql = format!(
            "SELECT {WORD_COLS} FROM words {clause}ORDER BY rowid LIMIT {limit} OFFSET {offset}"
        );
        let mut rows = self
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut words = Vec::new();
        while let Some(row) = rows.next().await? {
            words.push(row_to_word(&row)?);
        }

        self.attach_definitions(&mut words).await?;
        Ok(words)
    }

    /// Fetch one word by ID.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` when no row matches, distinct from
    /// lower-level query failures.
    pub async fn select_word_by_id(&self, id: &str) -> Result<Word, DatabaseError> {
        let filter = SearchFilter::all(vec![SearchCondition::eq("id", id)]);
        self.select_words(&filter, 1, 0)
            .await?
            .pop()
            .ok_or(DatabaseError::NotFound)
    }

    /// Fetch one word by its text.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` when no row matches.
    pub async fn select_word_by_text(&self, word: &str) -> Result<Word, DatabaseError> {
        let filter = SearchFilter::all(vec![SearchCondition::eq("word", word)]);
        self.select_words(&filter, 1, 0)
            .await?
            .pop()
            .ok_or(DatabaseError::NotFound)
    }

    /// Update a word's mutable fields and fully replace its definition set,
    /// in one transaction.
    ///
    /// The draft is the complete new state: an unset familiarity defaults to
    /// red, and the supplied definitions replace the old set under fresh IDs
    /// (definition identity is not preserved across updates).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` (after rollback) when the word row
    /// does not exist, or `DatabaseError` on any statement failure.
    pub async fn update_word(&self, id: &str, draft: WordDraft) -> Result<Word, DatabaseError> {
        let now = Utc::now();
        let familiarity = draft.familiarity.unwrap_or_default();

        let mut definition_ids = Vec::with_capacity(draft.definitions.len());
        for _ in &draft.definitions {
            definition_ids.push(self.generate_id(PREFIX_DEFINITION).await?);
        }

        let tx = self.conn().transaction().await?;
        let affected = tx
            .execute(
                "UPDATE words SET word = ?1, familiarity = ?2, updated_at = ?3 WHERE id = ?4",
                libsql::params![
                    draft.word.as_str(),
                    familiarity.as_str(),
                    now.to_rfc3339(),
                    id
                ],
            )
            .await?;
        if affected == 0 {
            // Dropping the uncommitted transaction rolls it back.
            return Err(DatabaseError::NotFound);
        }

        tx.execute("DELETE FROM word_definitions WHERE word_id = ?1", [id])
            .await?;

        for (definition_draft, definition_id) in draft.definitions.iter().zip(&definition_ids) {
            insert_definition(&tx, definition_id, id, definition_draft, &now.to_rfc3339()).await?;
        }

        tx.commit().await?;

        self.select_word_by_id(id).await
    }

    /// Delete a word and its definitions in one transaction.
    ///
    /// Definitions go first to satisfy referential ordering; the word delete
    /// carries the affected-row check.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` (after rollback) when the word row
    /// does not exist.
    pub async fn delete_word(&self, id: &str) -> Result<(), DatabaseError> {
        let tx = self.conn().transaction().await?;
        tx.execute("DELETE FROM word_definitions WHERE word_id = ?1", [id])
            .await?;
        let affected = tx.execute("DELETE FROM words WHERE id = ?1", [id]).await?;
        if affected == 0 {
            return Err(DatabaseError::NotFound);
        }
        tx.commit().await?;
        Ok(())
    }

    /// Count words matching `filter`, for pagination totals.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidFilter` for non-allowlisted filter
    /// columns, or `DatabaseError` on query failure.
    pub async fn count_words(&self, filter: &SearchFilter) -> Result<u64, DatabaseError> {
        let (clause, params) = where_clause(filter, WORD_COLUMNS, 1)?;
        let sql = format!("SELECT COUNT(*) FROM words {clause}");
        let mut rows = self
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound)?;
        Ok(row.get::<i64>(0)? as u64)
    }

    /// Select up to `count` random words matching `filter`, without
    /// replacement, for quiz generation.
    ///
    /// When fewer rows match, all of them are returned; the result length
    /// is a lower-bound hint, not a guarantee.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidFilter` for non-allowlisted filter
    /// columns, or `DatabaseError` on query failure.
    pub async fn sample_words(
        &self,
        count: u32,
        filter: &SearchFilter,
    ) -> Result<Vec<Word>, DatabaseError> {
        let (clause, params) = where_clause(filter, WORD_COLUMNS, 1)?;
        let sql =
            format!("SELECT {WORD_COLS} FROM words {clause}ORDER BY random() LIMIT {count}");
        let mut rows = self
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut words = Vec::new();
        while let Some(row) = rows.next().await? {
            words.push(row_to_word(&row)?);
        }

        self.attach_definitions(&mut words).await?;
        Ok(words)
    }

    /// Batched definition fan-out: one IN-clause query for every word in
    /// `words`, grouped client-side, insertion order preserved per word.
    async fn attach_definitions(&self, words: &mut [Word]) -> Result<(), DatabaseError> {
        if words.is_empty() {
            return Ok(());
        }

        let placeholders = (1..=words.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT {DEFINITION_COLS} FROM word_definitions
             WHERE word_id IN ({placeholders}) ORDER BY rowid"
        );
        let params: Vec<libsql::Value> = words.iter().map(|w| w.id.as_str().into()).collect();

        let mut rows = self
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut by_word: HashMap<String, Vec<WordDefinition>> = HashMap::new();
        while let Some(row) = rows.next().await? {
            let definition = row_to_definition(&row)?;
            by_word
                .entry(definition.word_id.clone())
                .or_default()
                .push(definition);
        }

        for word in words {
            if let Some(definitions) = by_word.remove(&word.id) {
                word.definitions = definitions;
            }
        }
        Ok(())
    }
}

async fn insert_definition(
    tx: &libsql::Transaction,
    id: &str,
    word_id: &str,
    draft: &DefinitionDraft,
    now_rfc3339: &str,
) -> Result<(), DatabaseError> {
    let phonetics_json =
        serde_json::to_string(&draft.phonetics).map_err(|e| DatabaseError::Other(e.into()))?;
    let examples_json =
        serde_json::to_string(&draft.examples).map_err(|e| DatabaseError::Other(e.into()))?;

    tx.execute(
        "INSERT INTO word_definitions
             (id, word_id, part_of_speech, definition, phonetics, examples, notes,
              created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        libsql::params![
            id,
            word_id,
            draft.part_of_speech.as_deref(),
            draft.definition.as_str(),
            phonetics_json,
            examples_json,
            draft.notes.as_deref(),
            now_rfc3339,
            now_rfc3339
        ],
    )
    .await?;
    Ok(())
}

fn materialize_definition(
    id: String,
    word_id: String,
    draft: DefinitionDraft,
    now: chrono::DateTime<Utc>,
) -> WordDefinition {
    WordDefinition {
        id,
        word_id,
        part_of_speech: draft.part_of_speech,
        definition: draft.definition,
        examples: draft.examples,
        phonetics: draft.phonetics,
        notes: draft.notes,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vocab_core::enums::Familiarity;

    use crate::test_support::helpers::{test_db, word_draft};

    #[tokio::test]
    async fn insert_select_roundtrip() {
        let db = test_db().await;

        let inserted = db.insert_word(word_draft("hello", 3)).await.unwrap();
        assert!(inserted.id.starts_with("wrd-"));
        assert_eq!(inserted.familiarity, Familiarity::Red);
        assert_eq!(inserted.definitions.len(), 3);
        assert!(inserted.definitions.iter().all(|d| d.id.starts_with("def-")));

        let fetched = db.select_word_by_id(&inserted.id).await.unwrap();
        assert_eq!(fetched.word, "hello");
        assert_eq!(fetched.definitions.len(), 3);
        for (i, definition) in fetched.definitions.iter().enumerate() {
            assert_eq!(definition.definition, format!("hello sense {i}"));
            assert_eq!(definition.word_id, inserted.id);
        }
    }

    #[tokio::test]
    async fn insert_rolls_back_on_definition_failure() {
        let db = test_db().await;

        let mut draft = word_draft("partial", 2);
        // Violates the CHECK (definition <> '') constraint on the second row.
        draft.definitions[1].definition = String::new();

        let result = db.insert_word(draft).await;
        assert!(result.is_err());

        assert!(matches!(
            db.select_word_by_text("partial").await,
            Err(DatabaseError::NotFound)
        ));
        assert_eq!(db.count_words(&SearchFilter::empty()).await.unwrap(), 0);

        let mut rows = db
            .conn()
            .query("SELECT COUNT(*) FROM word_definitions", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 0, "no orphan definitions");
    }

    #[tokio::test]
    async fn update_replaces_definition_set() {
        let db = test_db().await;

        let word = db.insert_word(word_draft("replace", 2)).await.unwrap();
        let old_ids: Vec<String> = word.definitions.iter().map(|d| d.id.clone()).collect();

        let mut draft = word_draft("replace", 3);
        draft.familiarity = Some(Familiarity::Green);
        let updated = db.update_word(&word.id, draft).await.unwrap();

        assert_eq!(updated.familiarity, Familiarity::Green);
        assert_eq!(updated.definitions.len(), 3);
        for definition in &updated.definitions {
            assert!(
                !old_ids.contains(&definition.id),
                "replaced definitions must get fresh ids"
            );
        }
        assert_eq!(updated.created_at, word.created_at);
        assert!(updated.updated_at >= word.updated_at);
    }

    #[tokio::test]
    async fn update_missing_word_is_not_found() {
        let db = test_db().await;
        let result = db.update_word("wrd-00000000", word_draft("ghost", 1)).await;
        assert!(matches!(result, Err(DatabaseError::NotFound)));
        // The rolled-back update must not have inserted definitions.
        let mut rows = db
            .conn()
            .query("SELECT COUNT(*) FROM word_definitions", ())
            .await
            .unwrap();
        assert_eq!(rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_removes_word_and_definitions() {
        let db = test_db().await;
        let word = db.insert_word(word_draft("gone", 2)).await.unwrap();

        db.delete_word(&word.id).await.unwrap();

        assert!(matches!(
            db.select_word_by_id(&word.id).await,
            Err(DatabaseError::NotFound)
        ));
        let mut rows = db
            .conn()
            .query(
                "SELECT COUNT(*) FROM word_definitions WHERE word_id = ?1",
                [word.id.as_str()],
            )
            .await
            .unwrap();
        assert_eq!(rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_missing_word_is_not_found() {
        let db = test_db().await;
        assert!(matches!(
            db.delete_word("wrd-00000000").await,
            Err(DatabaseError::NotFound)
        ));
    }

    #[tokio::test]
    async fn select_filters_and_paginates() {
        let db = test_db().await;
        for word in ["alpha", "beta", "gamma", "delta"] {
            db.insert_word(word_draft(word, 1)).await.unwrap();
        }
        let mut green = word_draft("epsilon", 1);
        green.familiarity = Some(Familiarity::Green);
        db.insert_word(green).await.unwrap();

        let red_filter =
            SearchFilter::all(vec![SearchCondition::eq("familiarity", "red")]);
        assert_eq!(db.count_words(&red_filter).await.unwrap(), 4);

        let page_one = db.select_words(&red_filter, 2, 0).await.unwrap();
        let page_two = db.select_words(&red_filter, 2, 2).await.unwrap();
        assert_eq!(page_one.len(), 2);
        assert_eq!(page_two.len(), 2);
        assert_eq!(page_one[0].word, "alpha");
        assert_eq!(page_two[0].word, "gamma");

        let like = SearchFilter::all(vec![SearchCondition::like("word", "%eta")]);
        let matched = db.select_words(&like, 10, 0).await.unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].word, "beta");
    }

    #[tokio::test]
    async fn batched_fetch_attaches_definitions_to_right_words() {
        let db = test_db().await;
        db.insert_word(word_draft("one", 1)).await.unwrap();
        db.insert_word(word_draft("two", 2)).await.unwrap();
        db.insert_word(word_draft("three", 3)).await.unwrap();

        let words = db
            .select_words(&SearchFilter::empty(), 10, 0)
            .await
            .unwrap();
        assert_eq!(words.len(), 3);
        for word in &words {
            let expected = match word.word.as_str() {
                "one" => 1,
                "two" => 2,
                _ => 3,
            };
            assert_eq!(word.definitions.len(), expected);
            for definition in &word.definitions {
                assert!(definition.definition.starts_with(&word.word));
            }
        }
    }

    #[tokio::test]
    async fn sample_returns_all_when_underfilled() {
        let db = test_db().await;
        for i in 0..10 {
            db.insert_word(word_draft(&format!("word{i}"), 1))
                .await
                .unwrap();
        }

        let sampled = db
            .sample_words(50, &SearchFilter::empty())
            .await
            .unwrap();
        assert_eq!(sampled.len(), 10);

        // Without replacement: no duplicates.
        let mut ids: Vec<&str> = sampled.iter().map(|w| w.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[tokio::test]
    async fn sample_honors_filter() {
        let db = test_db().await;
        for i in 0..4 {
            let mut draft = word_draft(&format!("red{i}"), 1);
            draft.familiarity = Some(Familiarity::Red);
            db.insert_word(draft).await.unwrap();
        }
        let mut green = word_draft("green0", 1);
        green.familiarity = Some(Familiarity::Green);
        db.insert_word(green).await.unwrap();

        let filter = SearchFilter::all(vec![SearchCondition::eq("familiarity", "red")]);
        let sampled = db.sample_words(3, &filter).await.unwrap();
        assert_eq!(sampled.len(), 3);
        assert!(sampled.iter().all(|w| w.familiarity == Familiarity::Red));
    }

    #[tokio::test]
    async fn unknown_filter_column_is_rejected() {
        let db = test_db().await;
        let filter = SearchFilter::all(vec![SearchCondition::eq("secret", "x")]);
        assert!(matches!(
            db.select_words(&filter, 10, 0).await,
            Err(DatabaseError::InvalidFilter(_))
        ));
        assert!(matches!(
            db.count_words(&filter).await,
            Err(DatabaseError::InvalidFilter(_))
        ));
    }
}
