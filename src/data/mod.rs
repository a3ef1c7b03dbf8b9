/// Data layer: dataset rows, loading, and the derived option lists.
///
/// Architecture:
/// ```text
///  Cleaned_Car_data.csv (file or URL)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse → Vec<Row>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  index    │  distinct, sorted values per selector
///   └──────────┘
/// ```

pub mod index;
pub mod loader;
pub mod model;
