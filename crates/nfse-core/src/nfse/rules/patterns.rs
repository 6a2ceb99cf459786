//! Common regex patterns for NFSe provider extraction.
//!
//! OCR output drops accents unpredictably, so every accented letter in a
//! marker or label also accepts its bare form (`ç`/`c`, `ã`/`a`, `í`/`i`).

use lazy_static::lazy_static;
use regex::Regex;

/// "Dados do Prestador", optionally followed by "de Serviço(s)".
pub const SECTION_START: &str = r"(?i)dados\s+do\s+prestador(?:\s+de\s+servi[çc]os?)?";

/// "Dados do Tomador" or "Discriminação do(s) Serviço(s)".
pub const SECTION_END: &str =
    r"(?i)dados\s+do\s+tomador|discrimina[çc][ãa]o\s+dos?\s+servi[çc]os?";

/// CNPJ as printed: `NN.NNN.NNN/NNNN-NN`.
pub const CNPJ: &str = r"[0-9]{2}\.[0-9]{3}\.[0-9]{3}/[0-9]{4}-[0-9]{2}";

/// "Razão Social" label with its separator. The trailing `\s*` may cross a
/// line break, so a value printed on the next line is still found.
pub const LEGAL_NAME_LABEL: &str = r"(?i)raz[ãa]o\s+social\s*:?\s*";

/// Field labels that end a legal name printed on the same line. A label
/// only counts with its `:` separator, so names containing these words
/// ("EMAIL MARKETING LTDA") are kept whole.
pub const LEGAL_NAME_STOP: &str = r"(?i)\b(?:cpf\s*/\s*cnpj|cnpj|cpf|inscri[çc][ãa]o\s+(?:municipal|estadual)|nome\s+fantasia|endere[çc]o|munic[íi]pio|e-?mail|telefone)\s*:";

lazy_static! {
    pub static ref SECTION_START_PATTERN: Regex = Regex::new(SECTION_START).unwrap();

    pub static ref SECTION_END_PATTERN: Regex = Regex::new(SECTION_END).unwrap();

    pub static ref CNPJ_PATTERN: Regex = Regex::new(CNPJ).unwrap();

    pub static ref LEGAL_NAME_LABEL_PATTERN: Regex = Regex::new(LEGAL_NAME_LABEL).unwrap();

    pub static ref LEGAL_NAME_STOP_PATTERN: Regex = Regex::new(LEGAL_NAME_STOP).unwrap();

    // Any run of whitespace, collapsed to one space in captured names
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}
