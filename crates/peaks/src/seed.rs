//! Built-in catalog of Polish summits, used when no catalog file is configured.

use crate::catalog::InMemoryCatalog;
use crate::model::Peak;

/// The highest peak of each major Polish range.
pub fn polish_peaks() -> Vec<Peak> {
    vec![
        Peak::new(1, "Rysy", 2499, 49.1795, 20.0881, "Tatry"),
        Peak::new(2, "Śnieżka", 1602, 50.7361, 15.7400, "Karkonosze"),
        Peak::new(3, "Babia Góra", 1725, 49.5731, 19.5297, "Beskidy"),
        Peak::new(4, "Tarnica", 1346, 49.0758, 22.7267, "Bieszczady"),
        Peak::new(5, "Śnieżnik", 1425, 50.2067, 16.8483, "Masyw Śnieżnika"),
        Peak::new(6, "Kalenica", 964, 50.6428, 16.5464, "Góry Sowie"),
    ]
}

/// [`polish_peaks`] wrapped as a catalog.
pub fn seed_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(polish_peaks())
}
