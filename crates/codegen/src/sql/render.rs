//! Rendering statement fragments to SQL text.

use super::stmt::{Statement, SyncBatch};
use enumlookup_core::{SqlParameter, SqlValue};

/// How values reach the SQL text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueMode {
    /// Named placeholders, values returned as parameters
    Parameters,
    /// Values inlined as literals
    Literals,
}

/// Rendered SQL with its parameters (empty in literal mode)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedSql {
    pub sql: String,
    pub params: Vec<SqlParameter>,
}

// ============================================================================
// Parameter binding
// ============================================================================

/// Batch-scoped parameter counter.
///
/// One counter is shared by every statement of a batch, so parameter names
/// never repeat: `id0, name1, id2, name3, ...`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamCounter {
    next: usize,
}

impl ParamCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next parameter name for a stem
    pub fn next_name(&mut self, stem: &str) -> String {
        let name = format!("{}{}", stem, self.next);
        self.next += 1;
        name
    }

    /// Number of names handed out so far
    pub fn issued(&self) -> usize {
        self.next
    }
}

/// Turns values into SQL text for one batch
#[derive(Debug)]
pub struct ValueBinder {
    mode: ValueMode,
    counter: ParamCounter,
    params: Vec<SqlParameter>,
}

impl ValueBinder {
    pub fn new(mode: ValueMode) -> Self {
        Self {
            mode,
            counter: ParamCounter::new(),
            params: Vec::new(),
        }
    }

    pub fn mode(&self) -> ValueMode {
        self.mode
    }

    /// SQL text standing for `value`: a fresh placeholder (recording the
    /// parameter) or a literal
    pub fn bind<D: SqlDialect + ?Sized>(
        &mut self,
        dialect: &D,
        stem: &str,
        value: impl Into<SqlValue>,
    ) -> String {
        let value = value.into();
        match self.mode {
            ValueMode::Literals => dialect.literal(&value),
            ValueMode::Parameters => {
                let name = self.counter.next_name(stem);
                let placeholder = dialect.placeholder(&name);
                self.params.push(SqlParameter { name, value });
                placeholder
            }
        }
    }

    pub fn into_params(self) -> Vec<SqlParameter> {
        self.params
    }
}

// ============================================================================
// SqlDialect
// ============================================================================

/// Dialect-specific SQL rendering.
///
/// Implement the four required methods to support another engine; batch
/// assembly is shared.
pub trait SqlDialect {
    /// Quote an identifier
    fn quote_ident(&self, ident: &str) -> String;

    /// Render a value as a literal
    fn literal(&self, value: &SqlValue) -> String;

    /// Placeholder text for a named parameter
    fn placeholder(&self, name: &str) -> String;

    /// Render one statement, including its terminator
    fn render_statement(&self, statement: &Statement, values: &mut ValueBinder) -> String;

    /// Render a whole batch. Phases are separated by a blank line.
    fn render_batch(&self, batch: &SyncBatch, mode: ValueMode) -> RenderedSql {
        let mut binder = ValueBinder::new(mode);
        let mut sql = String::new();
        let mut previous = None;

        for statement in batch.iter() {
            let phase = statement.phase();
            if previous.is_some_and(|p| p != phase) {
                sql.push('\n');
            }
            previous = Some(phase);

            sql.push_str(&self.render_statement(statement, &mut binder));
            sql.push('\n');
        }

        RenderedSql {
            sql,
            params: binder.into_params(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
