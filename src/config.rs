/// Maximum number of angles between 0 and 90 degrees at which amplitudes are computed.
pub const MAX_ANGLES: usize = 1000;
/// Minimum number of angles between 0 and 90 degrees. Smaller requests are clamped up to this.
pub const MIN_ANGLES: usize = 2;
/// Upper bound on the number of terms in the logarithmic derivative recursion.
/// Above this the solver is outside its validated double-precision range.
pub const MAX_TERMS: usize = 150_000;
/// Extra terms added on top of the series length to seed the downward recursion.
/// Bohren & Huffman used 16; one fewer makes no measurable difference.
pub const TERM_MARGIN: f64 = 15.0;
/// Default number of angles between 0 and 90 degrees when none is configured.
pub const DEFAULT_ANGLES: usize = 91;
