// Document rendering: block model -> Helvetica line layout -> lopdf objects.
// Output must stay byte-stable across renders.

pub mod document;
pub mod metrics;
pub mod offer_letter;
pub mod pdf;
