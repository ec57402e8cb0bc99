//! Human-readable rendering of values and the report sink.
//!
//! Every value that appears as a property parameter must implement [`Show`]
//! so a counterexample can be printed. Scalars render in their natural text
//! form and containers render as `[a, b, c]`.

use std::collections::{LinkedList, VecDeque};
use std::io::Write;

pub trait Show {
    fn show(&self) -> String;
}

macro_rules! showable_type {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Show for $ty {
                fn show(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

showable_type!(
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    bool, char, str, String,
);

// Debug keeps exponents ("1e300") where Display would spell out every digit.
impl Show for f32 {
    fn show(&self) -> String {
        format!("{:?}", self)
    }
}

impl Show for f64 {
    fn show(&self) -> String {
        format!("{:?}", self)
    }
}

impl Show for half::f16 {
    fn show(&self) -> String {
        format!("{:?}", self)
    }
}

impl<T: Show + ?Sized> Show for &T {
    fn show(&self) -> String {
        (**self).show()
    }
}

impl<T: Show> Show for [T] {
    fn show(&self) -> String {
        show_container(self)
    }
}

impl<T: Show> Show for Vec<T> {
    fn show(&self) -> String {
        show_container(self)
    }
}

impl<T: Show> Show for VecDeque<T> {
    fn show(&self) -> String {
        show_container(self)
    }
}

impl<T: Show> Show for LinkedList<T> {
    fn show(&self) -> String {
        show_container(self)
    }
}

/// Render a sequence as `[a, b, c]`.
pub fn show_container<'a, T, I>(xs: I) -> String
where
    T: Show + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let items: Vec<String> = xs.into_iter().map(Show::show).collect();
    format!("[{}]", items.join(", "))
}

/// Append-only text sink for run reports.
///
/// Write errors are logged and otherwise ignored; they never change the
/// outcome of a run.
pub struct Reporter<'a> {
    out: &'a mut dyn Write,
}

impl<'a> Reporter<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        Reporter { out }
    }

    pub fn line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{}", text) {
            log::warn!("failed to write report line: {}", err);
        }
    }

    /// A counterexample: the header, then one rendered line per parameter.
    pub fn falsifiable(&mut self, tests: u32, rendered: &[String]) {
        self.line(&format!("Falsifiable, after {} tests: ", tests));
        for value in rendered {
            self.line(value);
        }
    }

    pub fn passed(&mut self, tests: u32, discards: u32) {
        self.line(&format!(
            "OK, {} tests passed, {} tests discarded",
            tests, discards
        ));
    }

    pub fn caught_fault(&mut self, tests: u32) {
        self.line(&format!("Failed, caught exception after {} tests", tests));
    }
}
