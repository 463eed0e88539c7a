/// Enumerated conversion & pipeline contexts
/// Generally used for error reporting
#[derive(Debug, Clone)]
pub enum ErrorContext {
    Source(String),
    Cell(String),
    Instance(String),
    Layer(String),
    Ring(usize),
    Band(usize),
    Units,
    Geometry,
    Unknown,
}
