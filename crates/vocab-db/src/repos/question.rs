//! Question repository — single-table CRUD plus practice recording.
//!
//! No child-entity fan-out here; the interesting part is that update and
//! delete apply the same zero-rows-affected ⇒ `NotFound` discipline as the
//! word repository, and that the practice counters have exactly one mutator.

use vocab_core::entities::Question;
use vocab_core::ids::PREFIX_QUESTION;

use crate::VocabDb;
use crate::drafts::QuestionDraft;
use crate::error::DatabaseError;
use crate::filter::{QUESTION_COLUMNS, SearchCondition, SearchFilter, where_clause};
use crate::helpers::get_opt_string;

const QUESTION_COLS: &str = "id, question, answer, option_a, option_b, option_c, option_d, \
     notes, reference, count_practise, count_failure_practise";

fn row_to_question(row: &libsql::Row) -> Result<Question, DatabaseError> {
    Ok(Question {
        id: row.get(0)?,
        question: row.get(1)?,
        answer: row.get(2)?,
        option_a: row.get(3)?,
        option_b: get_opt_string(row, 4)?,
        option_c: get_opt_string(row, 5)?,
        option_d: get_opt_string(row, 6)?,
        notes: get_opt_string(row, 7)?,
        reference: get_opt_string(row, 8)?,
        count_practise: row.get::<i64>(9)? as u32,
        count_failure_practise: row.get::<i64>(10)? as u32,
    })
}

impl VocabDb {
    /// Insert a question with zeroed practice counters.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails.
    pub async fn insert_question(&self, draft: QuestionDraft) -> Result<Question, DatabaseError> {
        let id = self.generate_id(PREFIX_QUESTION).await?;

        self.conn()
            .execute(
                "INSERT INTO questions
                     (id, question, answer, option_a, option_b, option_c, option_d,
                      notes, reference, count_practise, count_failure_practise)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0, 0)",
                libsql::params![
                    id.as_str(),
                    draft.question.as_str(),
                    draft.answer.as_str(),
                    draft.option_a.as_str(),
                    draft.option_b.as_deref(),
                    draft.option_c.as_deref(),
                    draft.option_d.as_deref(),
                    draft.notes.as_deref(),
                    draft.reference.as_deref()
                ],
            )
            .await?;

        Ok(Question {
            id,
            question: draft.question,
            answer: draft.answer,
            option_a: draft.option_a,
            option_b: draft.option_b,
            option_c: draft.option_c,
            option_d: draft.option_d,
            notes: draft.notes,
            reference: draft.reference,
            count_practise: 0,
            count_failure_practise: 0,
        })
    }

    /// Select questions matching `filter`, with SQL-level limit/offset.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidFilter` for non-allowlisted filter
    /// columns, or `DatabaseError` on query failure.
    pub async fn select_questions(
        &self,
        filter: &SearchFilter,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Question>, DatabaseError> {
        let (clause, params) = where_clause(filter, QUESTION_COLUMNS, 1)?;
        let sql = format!(
            "SELECT {QUESTION_COLS} FROM questions {clause}ORDER BY rowid LIMIT {limit} OFFSET {offset}"
        );
        let mut rows = self
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut questions = Vec::new();
        while let Some(row) = rows.next().await? {
            questions.push(row_to_question(&row)?);
        }
        Ok(questions)
    }

    /// Fetch one question by ID.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` when no row matches.
    pub async fn select_question_by_id(&self, id: &str) -> Result<Question, DatabaseError> {
        let filter = SearchFilter::all(vec![SearchCondition::eq("id", id)]);
        self.select_questions(&filter, 1, 0)
            .await?
            .pop()
            .ok_or(DatabaseError::NotFound)
    }

    /// Update a question's content fields (not the practice counters).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` when the ID matches no row.
    pub async fn update_question(
        &self,
        id: &str,
        draft: QuestionDraft,
    ) -> Result<Question, DatabaseError> {
        let affected = self
            .conn()
            .execute(
                "UPDATE questions
                 SET question = ?1, answer = ?2, option_a = ?3, option_b = ?4,
                     option_c = ?5, option_d = ?6, notes = ?7, reference = ?8
                 WHERE id = ?9",
                libsql::params![
                    draft.question.as_str(),
                    draft.answer.as_str(),
                    draft.option_a.as_str(),
                    draft.option_b.as_deref(),
                    draft.option_c.as_deref(),
                    draft.option_d.as_deref(),
                    draft.notes.as_deref(),
                    draft.reference.as_deref(),
                    id
                ],
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NotFound);
        }
        self.select_question_by_id(id).await
    }

    /// Delete a question.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` when the ID matches no row.
    pub async fn delete_question(&self, id: &str) -> Result<(), DatabaseError> {
        let affected = self
            .conn()
            .execute("DELETE FROM questions WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NotFound);
        }
        Ok(())
    }

    /// Count questions matching `filter`, for pagination totals.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidFilter` for non-allowlisted filter
    /// columns, or `DatabaseError` on query failure.
    pub async fn count_questions(&self, filter: &SearchFilter) -> Result<u64, DatabaseError> {
        let (clause, params) = where_clause(filter, QUESTION_COLUMNS, 1)?;
        let sql = format!("SELECT COUNT(*) FROM questions {clause}");
        let mut rows = self
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound)?;
        Ok(row.get::<i64>(0)? as u64)
    }

    /// Select up to `count` random questions matching `filter`, without
    /// replacement. Fewer matches than `count` returns all of them.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidFilter` for non-allowlisted filter
    /// columns, or `DatabaseError` on query failure.
    pub async fn sample_questions(
        &self,
        count: u32,
        filter: &SearchFilter,
    ) -> Result<Vec<Question>, DatabaseError> {
        let (clause, params) = where_clause(filter, QUESTION_COLUMNS, 1)?;
        let sql = format!(
            "SELECT {QUESTION_COLS} FROM questions {clause}ORDER BY random() LIMIT {count}"
        );
        let mut rows = self
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut questions = Vec::new();
        while let Some(row) = rows.next().await? {
            questions.push(row_to_question(&row)?);
        }
        Ok(questions)
    }

    /// Record one practice attempt: bumps `count_practise`, and
    /// `count_failure_practise` too when `failed`. The only mutator of the
    /// counters, so `count_failure_practise <= count_practise` always holds.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` when the ID matches no row.
    pub async fn record_question_practice(
        &self,
        id: &str,
        failed: bool,
    ) -> Result<Question, DatabaseError> {
        let affected = self
            .conn()
            .execute(
                "UPDATE questions
                 SET count_practise = count_practise + 1,
                     count_failure_practise = count_failure_practise + ?1
                 WHERE id = ?2",
                libsql::params![i64::from(failed), id],
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NotFound);
        }
        tracing::debug!(id, failed, "practice recorded");
        self.select_question_by_id(id).await
    }
}
