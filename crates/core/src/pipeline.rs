use std::sync::atomic::{AtomicU64, Ordering};

use crate::chart::{ChartLayout, RenderConfig};
use crate::dataset::select;
use crate::error::Result;
use crate::hierarchy::Hierarchy;
use crate::loader::DatasetSource;
use crate::treemap::Tiling;

/// Runs one full pass: select, fetch, build, tile, lay out. Fetch and parse
/// failures propagate; nothing partial is returned.
pub fn render(
    config: &RenderConfig,
    source: &dyn DatasetSource,
    tiler: &dyn Tiling,
) -> Result<ChartLayout> {
    let dataset = select(config.dataset.as_deref());
    let _span = tracing::info_span!("render", dataset = %dataset.key).entered();
    let doc = source.fetch(dataset)?;
    let mut tree = Hierarchy::build(&doc)?;
    Ok(ChartLayout::compute(dataset, &mut tree, config, tiler))
}

/// Monotonic render counter. A pass tags its fetch with the generation it
/// started under and drops the result if a newer pass began meanwhile.
#[derive(Debug, Default)]
pub struct Generation(AtomicU64);

impl Generation {
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        let current = self.current();
        if generation != current {
            tracing::warn!(generation, current, "discarding stale render");
        }
        generation == current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetDescriptor;
    use crate::error::ChartError;
    use crate::model::DatasetNode;
    use crate::treemap::Squarify;

    struct Fixed(DatasetNode);

    impl DatasetSource for Fixed {
        fn fetch(&self, _: &DatasetDescriptor) -> Result<DatasetNode> {
            Ok(self.0.clone())
        }
    }

    struct Offline;

    impl DatasetSource for Offline {
        fn fetch(&self, _: &DatasetDescriptor) -> Result<DatasetNode> {
            Err(ChartError::Status {
                url: "https://example.invalid".into(),
                status: 503,
            })
        }
    }

    #[test]
    fn fetch_failure_propagates() {
        let err = render(&RenderConfig::default(), &Offline, &Squarify::default()).unwrap_err();
        assert!(matches!(err, ChartError::Status { status: 503, .. }));
    }

    #[test]
    fn dataset_key_drives_the_header() {
        let src = Fixed(DatasetNode::group("r", vec![DatasetNode::leaf("a", "x", 1.0)]));
        let config = RenderConfig {
            dataset: Some("movies".into()),
            ..RenderConfig::default()
        };
        let chart = render(&config, &src, &Squarify::default()).unwrap();
        assert_eq!(chart.header.title.text, "Movie Sales");
        assert_eq!(chart.cells.len(), 1);
    }

    #[test]
    fn only_the_latest_generation_is_current() {
        let g = Generation::default();
        let first = g.next();
        assert!(g.is_current(first));
        let second = g.next();
        assert!(!g.is_current(first));
        assert!(g.is_current(second));
    }
}
