/// A complex number, encoded as its real part followed by its imaginary part.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

/// Two `f32`s, eight bytes on the wire.
pub type Complex32 = Complex<f32>;

/// Two `f64`s, sixteen bytes on the wire.
pub type Complex64 = Complex<f64>;
