//! The root of the entity tree: one simulated instrument execution.

use crate::{config::RunConfig, Lane, Sampler};

/// One simulated run: identifier, configuration, and the populated lane
/// tree. Constructed eagerly, discarded after encoding completes.
#[derive(Debug)]
pub struct Run {
    pub config: RunConfig,
    /// Run identifier `<date>_<machine>_<nnnn>`.
    pub id: String,
    pub lanes: Vec<Lane>,
}

impl Run {
    /// Builds the full entity tree from a validated configuration,
    /// populating every cluster from the sampler.
    pub fn build(config: RunConfig, sampler: &mut Sampler) -> Self {
        let id = format!(
            "{}_{}_{:04}",
            config.date,
            config.platform.machine_name(),
            sampler.run_number()
        );
        let lanes = (0..config.lanes)
            .map(|l| Lane::build(l, &config, sampler))
            .collect();
        Self { config, id, lanes }
    }

    /// Name of the run output directory.
    pub fn folder_name(&self) -> String {
        format!("{}_FC", self.id)
    }

    /// Cycle numbers, 1-based and contiguous across the concatenation of
    /// all configured reads.
    pub fn cycles(&self) -> std::ops::RangeInclusive<u32> {
        1..=self.config.total_cycles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReadSpec;

    #[test]
    fn test_run_id_shape() {
        let mut sampler = Sampler::new(Some(11));
        let run = Run::build(RunConfig::default(), &mut sampler);

        let parts: Vec<_> = run.id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "250101");
        assert_eq!(parts[1], "NSTESTMACHINE");
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2].bytes().all(|b| b.is_ascii_digit()));
        assert!(run.folder_name().ends_with("_FC"));
    }

    #[test]
    fn test_lane_count_and_cycles() {
        let config = RunConfig {
            reads: vec![
                ReadSpec {
                    num_cycles: 3,
                    is_indexed: false,
                },
                ReadSpec {
                    num_cycles: 2,
                    is_indexed: true,
                },
            ],
            ..RunConfig::default()
        };
        let mut sampler = Sampler::new(Some(12));
        let run = Run::build(config, &mut sampler);

        assert_eq!(run.lanes.len(), 4);
        assert_eq!(run.cycles().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_seeded_builds_are_identical() {
        let run_a = Run::build(RunConfig::default(), &mut Sampler::new(Some(9)));
        let run_b = Run::build(RunConfig::default(), &mut Sampler::new(Some(9)));

        assert_eq!(run_a.id, run_b.id);
        let clusters_a: Vec<_> = run_a.lanes[0].clusters().copied().collect();
        let clusters_b: Vec<_> = run_b.lanes[0].clusters().copied().collect();
        assert_eq!(clusters_a, clusters_b);
    }
}
