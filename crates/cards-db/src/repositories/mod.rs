// Queries take any `E: Executor<'e, Database = Sqlite>`, so they run on the
// pool or inside a transaction.

pub mod flashcard;
pub mod topic;
