//! Engine task set

use heapless::Vec;

use super::Cadence;
use crate::config::CadenceConfig;

/// Number of recurring engine tasks
pub const TASK_COUNT: usize = 5;

/// Recurring engine tasks, in run order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskId {
    /// Ramp, evaluate, scroll ECG
    Frame,
    /// Scenario arrival and auto-stop
    ScenarioPoll,
    /// Displayed BPM jitter
    DisplayJitter,
    /// Temperature, pressure and respiration drift
    AmbientJitter,
    /// Watch-face clock
    Clock,
}

impl TaskId {
    /// All tasks in run order
    pub const ALL: [TaskId; TASK_COUNT] = [
        TaskId::Frame,
        TaskId::ScenarioPoll,
        TaskId::DisplayJitter,
        TaskId::AmbientJitter,
        TaskId::Clock,
    ];
}

/// Tasks due in one tick
pub type DueTasks = Vec<TaskId, TASK_COUNT>;

/// Cadences of every engine task
#[derive(Debug, Clone)]
pub struct TaskSet {
    cadences: [Cadence; TASK_COUNT],
}

impl TaskSet {
    pub fn new(config: &CadenceConfig, start_ms: u64) -> Self {
        let period = |id: TaskId| match id {
            TaskId::Frame => config.frame_ms,
            TaskId::ScenarioPoll => config.scenario_poll_ms,
            TaskId::DisplayJitter => config.display_jitter_ms,
            TaskId::AmbientJitter => config.ambient_jitter_ms,
            TaskId::Clock => config.clock_ms,
        };
        Self {
            cadences: TaskId::ALL.map(|id| Cadence::every(period(id), start_ms)),
        }
    }

    /// Collect the tasks due at `now_ms`, in run order
    pub fn due(&mut self, now_ms: u64) -> DueTasks {
        let mut due = DueTasks::new();
        for (id, cadence) in TaskId::ALL.iter().zip(self.cadences.iter_mut()) {
            if cadence.poll(now_ms) {
                let _ = due.push(*id);
            }
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_order() {
        let mut tasks = TaskSet::new(&CadenceConfig::default(), 0);
        // Every default task is overdue by 2000 ms
        let due = tasks.due(2000);
        assert_eq!(due.as_slice(), &TaskId::ALL);
    }

    #[test]
    fn test_only_frame_early() {
        let mut tasks = TaskSet::new(&CadenceConfig::default(), 0);
        assert!(tasks.due(10).is_empty());
        assert_eq!(tasks.due(16).as_slice(), &[TaskId::Frame]);
    }

    #[test]
    fn test_counts_over_ten_seconds() {
        let mut tasks = TaskSet::new(&CadenceConfig::default(), 0);
        let mut counts = [0u32; TASK_COUNT];
        for now in 1..=10_000u64 {
            for id in tasks.due(now) {
                counts[id as usize] += 1;
            }
        }
        assert_eq!(counts[TaskId::Frame as usize], 625);
        assert_eq!(counts[TaskId::ScenarioPoll as usize], 100);
        assert_eq!(counts[TaskId::DisplayJitter as usize], 20);
        assert_eq!(counts[TaskId::AmbientJitter as usize], 5);
        assert_eq!(counts[TaskId::Clock as usize], 10);
    }
}
