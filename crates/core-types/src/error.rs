use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("No {statement} recorded for {company}")]
    MissingStatement {
        company: String,
        statement: &'static str,
    },
}
