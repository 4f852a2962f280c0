#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot intersect a rectangle with its own center ({x}, {y})")]
    DegenerateIntersection { x: f64, y: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
