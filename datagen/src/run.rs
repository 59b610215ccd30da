use std::path::Path;
use std::time::Duration;

use log::info;

use crate::{format_hms, HostError, Progress, RenderPlan, Split, Subject};

/// Scene-side collaborator the run drives.
///
/// Both calls block until the host has finished: every render reads the
/// scene state the preceding mutation left behind.
pub trait RenderHost {
    fn set_visibility(&mut self, subject: &str, visible: bool) -> Result<(), HostError>;
    fn render_to(&mut self, path: &Path) -> Result<(), HostError>;
}

/// What a completed run did.
#[derive(Debug, Clone, Copy)]
pub struct RunReport {
    pub rendered: u64,
    pub elapsed: Duration,
}

/// Renders every job of the plan in order, strictly one at a time.
///
/// Per job the mutation hook runs first, then the render. A host error
/// stops the run at the failing job; everything rendered before it is
/// already on disk and stays valid.
pub fn run<H, F>(plan: &RenderPlan, host: &mut H, mut mutate: F) -> Result<RunReport, HostError>
where
    H: RenderHost,
    F: FnMut(&mut H, &Subject) -> Result<(), HostError>,
{
    let total = plan.total_renders();
    let mut progress = Progress::new(total);

    // Hide everything up front; exactly one subject is shown per range below.
    for subject in plan.subjects() {
        if !subject.always_visible {
            host.set_visibility(&subject.name, false)?;
        }
    }

    let mut shown: Option<&Subject> = None;
    let mut current_split: Option<Split> = None;

    for job in plan.jobs() {
        if current_split != Some(job.split) {
            let renders: u64 = plan
                .splits()
                .iter()
                .filter(|s| s.split == job.split)
                .map(|s| s.renders_per_subject as u64)
                .sum::<u64>()
                * plan.subjects().len() as u64;
            info!("starting split: {} | total renders: {}", job.split, renders);
            current_split = Some(job.split);
        }

        let changed = match shown {
            Some(prev) => prev.name != job.subject.name,
            None => true,
        };
        if changed {
            if let Some(prev) = shown {
                if !prev.always_visible {
                    host.set_visibility(&prev.name, false)?;
                }
            }
            info!("starting subject: {}/{}", job.split, job.subject.name);
            if !job.subject.always_visible {
                host.set_visibility(&job.subject.name, true)?;
            }
            shown = Some(job.subject);
        }

        mutate(host, job.subject)?;
        info!("rendering image {} of {}", job.index + 1, total);
        host.render_to(&job.path)?;

        let done = progress.finish_one();
        if done < total {
            info!(
                "estimated remaining: {}",
                format_hms(progress.estimated_remaining())
            );
        }
    }

    if let Some(prev) = shown {
        if !prev.always_visible {
            host.set_visibility(&prev.name, false)?;
        }
    }

    // Leave every object visible again.
    for subject in plan.subjects() {
        if !subject.always_visible {
            host.set_visibility(&subject.name, true)?;
        }
    }

    Ok(RunReport {
        rendered: progress.done(),
        elapsed: progress.elapsed(),
    })
}
