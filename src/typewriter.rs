use crate::constants::*;
use crate::presentation::TimerTask;
use crate::timer::Scheduler;

/// Reveals a fixed message one character at a time.
pub struct Typewriter {
    message: Vec<char>,
    cursor: usize,
    output: String,
    // Bumped on every restart so ticks from an abandoned pass are dropped
    generation: u64,
}

impl Typewriter {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.chars().collect(),
            cursor: 0,
            output: String::new(),
            generation: 0,
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.message.len()
    }

    /// Clears the output and types the first character right away.
    pub fn start(&mut self, scheduler: &mut Scheduler<TimerTask>) {
        self.generation += 1;
        self.cursor = 0;
        self.output.clear();
        self.type_next(scheduler);
    }

    pub fn tick(&mut self, generation: u64, scheduler: &mut Scheduler<TimerTask>) {
        if generation == self.generation {
            self.type_next(scheduler);
        }
    }

    fn type_next(&mut self, scheduler: &mut Scheduler<TimerTask>) {
        let Some(&ch) = self.message.get(self.cursor) else {
            return;
        };
        self.output.push(ch);
        self.cursor += 1;

        if !self.is_finished() {
            let delay = if ch == '\n' { NEWLINE_DELAY_MS } else { TYPE_DELAY_MS };
            scheduler.schedule_once(
                delay,
                TimerTask::TypeNext {
                    generation: self.generation,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(typewriter: &mut Typewriter, scheduler: &mut Scheduler<TimerTask>, ms: u64) {
        let until = scheduler.now() + ms;
        while let Some(task) = scheduler.pop_due(until) {
            if let TimerTask::TypeNext { generation } = task {
                typewriter.tick(generation, scheduler);
            }
        }
        scheduler.settle(until);
    }

    #[test]
    fn first_character_appears_immediately() {
        let mut typewriter = Typewriter::new("Hi");
        let mut scheduler = Scheduler::new();

        typewriter.start(&mut scheduler);
        assert_eq!(typewriter.output(), "H");

        run(&mut typewriter, &mut scheduler, TYPE_DELAY_MS);
        assert_eq!(typewriter.output(), "Hi");
        assert!(typewriter.is_finished());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn newline_pauses_twice_as_long() {
        let mut typewriter = Typewriter::new("a\nb");
        let mut scheduler = Scheduler::new();

        typewriter.start(&mut scheduler);
        run(&mut typewriter, &mut scheduler, TYPE_DELAY_MS);
        assert_eq!(typewriter.output(), "a\n");

        run(&mut typewriter, &mut scheduler, NEWLINE_DELAY_MS - 1);
        assert_eq!(typewriter.output(), "a\n");

        run(&mut typewriter, &mut scheduler, 1);
        assert_eq!(typewriter.output(), "a\nb");
    }

    #[test]
    fn restart_abandons_the_previous_pass() {
        let mut typewriter = Typewriter::new("abcdef");
        let mut scheduler = Scheduler::new();

        typewriter.start(&mut scheduler);
        run(&mut typewriter, &mut scheduler, TYPE_DELAY_MS * 2);
        assert_eq!(typewriter.output(), "abc");

        typewriter.start(&mut scheduler);
        assert_eq!(typewriter.output(), "a");

        run(&mut typewriter, &mut scheduler, TYPE_DELAY_MS * 10);
        assert_eq!(typewriter.output(), "abcdef");
    }

    #[test]
    fn empty_message_types_nothing() {
        let mut typewriter = Typewriter::new("");
        let mut scheduler = Scheduler::new();

        typewriter.start(&mut scheduler);
        assert_eq!(typewriter.output(), "");
        assert!(typewriter.is_finished());
        assert_eq!(scheduler.pending(), 0);
    }
}
