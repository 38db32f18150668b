//! Contains [`Separated`], a list of inputs rendered with arbitrary separators in between.

use std::{
    fmt::{Debug, Display},
    ops::Range,
};

use proptest::{
    collection,
    strategy::{BoxedStrategy, Strategy},
    test_runner::TestCaseResult,
};

use crate::input::Input;

/// Is a list of inputs that render one after another, separated by arbitrary text such as
/// whitespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Separated<T> {
    /// The inputs in rendering order.
    pub items: Vec<T>,

    /// The separator rendered after each input but the last.
    pub separators: Vec<String>,
}

impl<T: Debug + 'static> Separated<T> {
    /// Creates a strategy generating between `size.start` and `size.end - 1` items.
    #[must_use]
    pub fn strategy(
        item: impl Strategy<Value = T> + 'static,
        separator: impl Strategy<Value = String> + 'static,
        size: Range<usize>,
    ) -> BoxedStrategy<Self> {
        collection::vec((item, separator), size)
            .prop_map(|pairs| {
                let (items, mut separators): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
                separators.pop();

                Self { items, separators }
            })
            .boxed()
    }
}

impl<T: Display> Display for Separated<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, item) in self.items.iter().enumerate() {
            Display::fmt(item, f)?;

            if let Some(separator) = self.separators.get(index) {
                f.write_str(separator)?;
            }
        }

        Ok(())
    }
}

impl<'a, 'b, T, U> Input<&'b [T]> for &'a Separated<U>
where
    for<'x, 'y> &'x U: Input<&'y T>,
{
    fn assert(self, output: &'b [T]) -> TestCaseResult { self.items.as_slice().assert(output) }
}
