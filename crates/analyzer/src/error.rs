use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Calculation error: {0}")]
    Calculation(#[from] calculator::CalculatorError),

    #[error("Reference data error: {0}")]
    Data(#[from] core_types::CoreError),
}
