use crate::Tracked;
use solo_memory::{Construct, upcast};

/// A value with a two-argument constructor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Widget {
    /// The first constructor argument
    pub a: i32,
    /// The second constructor argument
    pub b: i32,
}

impl Widget {
    /// Makes a widget from its parts
    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }
}

impl Construct<(i32, i32)> for Widget {
    fn construct((a, b): (i32, i32)) -> Self {
        Self::new(a, b)
    }
}

impl Construct<()> for Widget {
    fn construct(_: ()) -> Self {
        Self::new(-1, -1)
    }
}

/// A trait implemented by the shape fixtures, used for upcasting tests
pub trait Shape: Send {
    /// The area of the shape
    fn area(&self) -> f64;
}

/// A shape that owns a [Tracked] value, so that its complete teardown can be observed
#[derive(Debug)]
pub struct Circle {
    /// The circle's radius
    pub radius: f64,
    /// Records the circle's drop
    pub tracked: Tracked,
}

impl Shape for Circle {
    fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }
}

impl Construct<(f64, Tracked)> for Circle {
    fn construct((radius, tracked): (f64, Tracked)) -> Self {
        Self { radius, tracked }
    }
}

/// A stateless shape
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Square(pub f64);

impl Shape for Square {
    fn area(&self) -> f64 {
        self.0 * self.0
    }
}

impl Construct<(f64,)> for Square {
    fn construct((side,): (f64,)) -> Self {
        Self(side)
    }
}

upcast!(Circle => dyn Shape, Square => dyn Shape);
