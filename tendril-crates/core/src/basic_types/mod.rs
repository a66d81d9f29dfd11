mod clause_database_error;
mod trail;

pub use clause_database_error::ClauseDatabaseError;
pub(crate) use trail::Trail;
