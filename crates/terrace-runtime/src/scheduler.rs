use std::collections::VecDeque;
use std::time::Duration;

/// What a job wants after one step.
#[derive(Debug, PartialEq, Eq)]
pub enum Step<J> {
    /// Run again next tick.
    Yield(J),
    /// Run again once the clock reaches the deadline.
    Sleep(Duration, J),
    Done,
}

#[derive(Debug)]
struct Pending<J> {
    ready_at: Duration,
    job: J,
}

/// Cooperative scheduler with two lanes.
///
/// Started jobs run side by side, each stepped at most once per tick. The
/// build queue is FIFO: its coordinator steps the head job until it yields,
/// and jobs that finish hand over to the next one within the same tick.
pub struct Scheduler<J> {
    now: Duration,
    tick: u64,
    started: VecDeque<Pending<J>>,
    parked: Vec<Pending<J>>,
    queue: VecDeque<J>,
    current: Option<Pending<J>>,
    coordinating: bool,
}

impl<J> Default for Scheduler<J> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            tick: 0,
            started: VecDeque::new(),
            parked: Vec::new(),
            queue: VecDeque::new(),
            current: None,
            coordinating: false,
        }
    }
}

impl<J> Scheduler<J> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Starts an independent job; it first runs on the current or next tick.
    pub fn start(&mut self, job: J) {
        self.started.push_back(Pending {
            ready_at: self.now,
            job,
        });
    }

    pub fn start_after(&mut self, delay: Duration, job: J) {
        self.started.push_back(Pending {
            ready_at: self.now + delay,
            job,
        });
    }

    pub fn enqueue(&mut self, job: J) {
        self.queue.push_back(job);
    }

    pub fn start_coordinator(&mut self) {
        self.coordinating = true;
    }

    #[inline]
    pub fn is_coordinating(&self) -> bool {
        self.coordinating
    }

    /// Jobs started and not yet finished.
    pub fn started_len(&self) -> usize {
        self.started.len() + self.parked.len()
    }

    /// Queued builds, counting the one in progress.
    pub fn queued_len(&self) -> usize {
        self.queue.len() + usize::from(self.current.is_some())
    }

    pub fn is_idle(&self) -> bool {
        self.started_len() == 0 && self.queued_len() == 0
    }

    /// Moves the clock forward at the start of a tick.
    pub fn begin_tick(&mut self, dt: Duration) {
        self.now += dt;
        self.tick = self.tick.wrapping_add(1);
    }

    /// Next started job due this tick. Jobs not yet due are set aside for
    /// later ticks.
    pub fn next_started(&mut self) -> Option<J> {
        while let Some(p) = self.started.pop_front() {
            if p.ready_at <= self.now {
                return Some(p.job);
            }
            self.parked.push(p);
        }
        None
    }

    /// Files the result of stepping a started job.
    pub fn park(&mut self, step: Step<J>) {
        match step {
            Step::Yield(job) => self.parked.push(Pending {
                ready_at: self.now,
                job,
            }),
            Step::Sleep(ready_at, job) => self.parked.push(Pending { ready_at, job }),
            Step::Done => {}
        }
    }

    /// Next build job for the coordinator, if it is running and the head is due.
    pub fn next_build(&mut self) -> Option<J> {
        if !self.coordinating {
            return None;
        }
        match self.current.take() {
            Some(p) if p.ready_at <= self.now => Some(p.job),
            Some(p) => {
                self.current = Some(p);
                None
            }
            None => self.queue.pop_front(),
        }
    }

    /// Files the result of stepping the head build job. Returns true when the
    /// coordinator may continue with the next job this tick.
    pub fn park_build(&mut self, step: Step<J>) -> bool {
        match step {
            Step::Yield(job) => {
                self.current = Some(Pending {
                    ready_at: self.now,
                    job,
                });
                false
            }
            Step::Sleep(ready_at, job) => {
                self.current = Some(Pending { ready_at, job });
                false
            }
            Step::Done => true,
        }
    }

    /// Makes everything set aside this tick eligible again.
    pub fn end_tick(&mut self) {
        self.started.extend(self.parked.drain(..));
    }
}
