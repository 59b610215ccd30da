use std::path::{Path, PathBuf};

use crate::{PlanError, Split, SplitSpec};

/// Width of the zero-padded sample index in output file names.
pub const INDEX_WIDTH: usize = 6;

/// One renderable variant of the scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub name: String,
    /// Subjects that stay visible for the whole run are skipped by the
    /// show/hide choreography.
    pub always_visible: bool,
}
impl Subject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            always_visible: false,
        }
    }

    pub fn always_visible(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            always_visible: true,
        }
    }
}

/// One image to render: which subject is shown and where the file goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob<'a> {
    pub split: Split,
    pub subject: &'a Subject,
    pub index: u64,
    pub path: PathBuf,
}

/// Validated description of a full dataset run.
#[derive(Debug, Clone)]
pub struct RenderPlan {
    subjects: Vec<Subject>,
    splits: Vec<SplitSpec>,
    output_root: PathBuf,
}
impl RenderPlan {
    pub fn new(
        subjects: Vec<Subject>,
        splits: Vec<SplitSpec>,
        output_root: impl AsRef<Path>,
    ) -> Result<Self, PlanError> {
        for spec in &splits {
            if spec.renders_per_subject < 0 {
                return Err(PlanError::NegativeCount {
                    split: spec.split.as_str().to_string(),
                    count: spec.renders_per_subject,
                });
            }
        }

        let per_subject = splits
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.renders_per_subject as u64));
        if subjects.is_empty() && per_subject > 0 {
            return Err(PlanError::NoSubjects {
                requested: per_subject,
            });
        }

        let total = per_subject.saturating_mul(subjects.len() as u64);
        if total > 10u64.pow(INDEX_WIDTH as u32) {
            return Err(PlanError::IndexOverflow {
                total,
                width: INDEX_WIDTH,
            });
        }

        Ok(Self {
            subjects,
            splits,
            output_root: output_root.as_ref().to_path_buf(),
        })
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn splits(&self) -> &[SplitSpec] {
        &self.splits
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn total_renders(&self) -> u64 {
        let per_subject: u64 = self
            .splits
            .iter()
            .map(|s| s.renders_per_subject as u64)
            .sum();
        per_subject * self.subjects.len() as u64
    }

    /// File path for one sample, `<root>/<split>/<subject>/<index>.png`.
    pub fn sample_path(&self, split: Split, subject: &str, index: u64) -> PathBuf {
        self.output_root
            .join(split.as_str())
            .join(subject)
            .join(format!("{:0width$}.png", index, width = INDEX_WIDTH))
    }

    /// Lazy traversal: splits outer, subjects inner, indices innermost,
    /// with one global index counter across the whole run.
    pub fn jobs(&self) -> Jobs<'_> {
        Jobs {
            plan: self,
            split_idx: 0,
            subject_idx: 0,
            offset: 0,
            next_index: 0,
        }
    }
}

pub struct Jobs<'a> {
    plan: &'a RenderPlan,
    split_idx: usize,
    subject_idx: usize,
    offset: u64,
    next_index: u64,
}
impl<'a> Iterator for Jobs<'a> {
    type Item = RenderJob<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let spec = self.plan.splits.get(self.split_idx)?;
            if self.subject_idx >= self.plan.subjects.len() {
                self.split_idx += 1;
                self.subject_idx = 0;
                continue;
            }
            if self.offset == spec.renders_per_subject as u64 {
                self.subject_idx += 1;
                self.offset = 0;
                continue;
            }

            let subject = &self.plan.subjects[self.subject_idx];
            let index = self.next_index;
            self.next_index += 1;
            self.offset += 1;
            return Some(RenderJob {
                split: spec.split,
                subject,
                index,
                path: self.plan.sample_path(spec.split, &subject.name, index),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Vec<Subject> {
        vec![Subject::new("A"), Subject::new("B"), Subject::new("C")]
    }

    #[test]
    fn nine_jobs_in_traversal_order() {
        let plan = RenderPlan::new(
            abc(),
            vec![
                SplitSpec::new(Split::Train, 2),
                SplitSpec::new(Split::Val, 1),
            ],
            "data",
        )
        .unwrap();

        assert_eq!(plan.total_renders(), 9);

        let paths: Vec<PathBuf> = plan.jobs().map(|j| j.path).collect();
        let expected = [
            "data/train/A/000000.png",
            "data/train/A/000001.png",
            "data/train/B/000002.png",
            "data/train/B/000003.png",
            "data/train/C/000004.png",
            "data/train/C/000005.png",
            "data/val/A/000006.png",
            "data/val/B/000007.png",
            "data/val/C/000008.png",
        ];
        assert_eq!(paths.len(), expected.len());
        for (path, expected) in paths.iter().zip(expected) {
            assert_eq!(path, Path::new(expected));
        }
    }

    #[test]
    fn indices_are_contiguous_from_zero() {
        let plan = RenderPlan::new(
            abc(),
            vec![
                SplitSpec::new(Split::Train, 5),
                SplitSpec::new(Split::Val, 0),
                SplitSpec::new(Split::Test, 3),
            ],
            "out",
        )
        .unwrap();

        let indices: Vec<u64> = plan.jobs().map(|j| j.index).collect();
        assert_eq!(indices.len() as u64, plan.total_renders());
        for (i, index) in indices.iter().enumerate() {
            assert_eq!(*index, i as u64);
        }
    }

    #[test]
    fn split_and_subject_follow_given_order() {
        let plan = RenderPlan::new(
            vec![Subject::new("Full"), Subject::new("Empty")],
            vec![
                SplitSpec::new(Split::Test, 1),
                SplitSpec::new(Split::Train, 1),
            ],
            "out",
        )
        .unwrap();

        let order: Vec<(Split, String)> = plan
            .jobs()
            .map(|j| (j.split, j.subject.name.clone()))
            .collect();
        assert_eq!(
            order,
            vec![
                (Split::Test, "Full".to_string()),
                (Split::Test, "Empty".to_string()),
                (Split::Train, "Full".to_string()),
                (Split::Train, "Empty".to_string()),
            ]
        );
    }

    #[test]
    fn negative_count_is_rejected() {
        let err = RenderPlan::new(abc(), vec![SplitSpec::new(Split::Train, -1)], "out").unwrap_err();
        match err {
            PlanError::NegativeCount { split, count } => {
                assert_eq!(split, "train");
                assert_eq!(count, -1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_subject_list_with_renders_is_rejected() {
        let err =
            RenderPlan::new(vec![], vec![SplitSpec::new(Split::Train, 10)], "out").unwrap_err();
        assert!(matches!(err, PlanError::NoSubjects { requested: 10 }));
    }

    #[test]
    fn empty_plan_is_fine() {
        let plan = RenderPlan::new(vec![], vec![], "out").unwrap();
        assert_eq!(plan.total_renders(), 0);
        assert_eq!(plan.jobs().count(), 0);
    }

    #[test]
    fn totals_that_break_index_padding_are_rejected() {
        let err = RenderPlan::new(
            abc(),
            vec![SplitSpec::new(Split::Train, 400_000)],
            "out",
        )
        .unwrap_err();
        match err {
            PlanError::IndexOverflow { total, width } => {
                assert_eq!(total, 1_200_000);
                assert_eq!(width, INDEX_WIDTH);
            }
            other => panic!("unexpected error: {other}"),
        }

        // One million exactly still fits: the last index is 999999.
        let plan = RenderPlan::new(
            vec![Subject::new("A")],
            vec![SplitSpec::new(Split::Train, 1_000_000)],
            "out",
        )
        .unwrap();
        assert_eq!(plan.total_renders(), 1_000_000);
    }
}
