use thiserror::Error;

use crate::builder::Bank;

/// Erros possíveis durante a conversão de extratos para o formato HomeBank
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Nenhum banco foi selecionado
    #[error("No valid CSV bank format was selected")]
    NoBankSelected,

    /// Mais de um banco foi selecionado ao mesmo tempo
    #[error("Exactly one CSV bank format must be selected, got {}", .0.len())]
    MultipleBanksSelected(Vec<Bank>),

    /// Erro ao ler o conteúdo do arquivo do disco
    #[error("Failed to read file content: {0}")]
    ReadContentFailed(#[from] std::io::Error),

    /// O builder foi chamado sem fornecer conteúdo nem caminho de arquivo
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,

    /// Erro do leitor/escritor CSV (aspas desbalanceadas, UTF-8 inválido, ...)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ── Erros de campos ─────────────────────────────────────────────────────────

    /// Data fora do padrão fixo da instituição
    #[error("Invalid date '{value}', expected {pattern}")]
    InvalidDate { value: String, pattern: &'static str },

    /// Valor monetário não numérico
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    /// Campo presente mas com conteúdo inesperado
    #[error("Malformed field '{field}': '{value}'")]
    MalformedField { field: &'static str, value: String },

    /// Erro de um campo, com a linha do arquivo de origem onde ocorreu
    #[error("Line {line}: {source}")]
    Row {
        line: u64,
        #[source]
        source: Box<ConvertError>,
    },
}

impl ConvertError {
    /// Anexa o número da linha de origem ao erro
    pub fn at_line(self, line: u64) -> Self {
        match self {
            row @ ConvertError::Row { .. } => row,
            other => ConvertError::Row {
                line,
                source: Box::new(other),
            },
        }
    }
}

/// Alias conveniente para Result com nosso tipo de erro principal
pub type ConvertResult<T> = Result<T, ConvertError>;
