use super::MatchSource;
use crate::entry::Identity;
use crate::rules::Direction;
use schema::Region;
use serde::Serialize;

/// Diagnostic emitted while resolving one evolution list. Only recorded when
/// [`super::ResolverOptions::debug`] is set.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionEvent {
    ResolutionStarted {
        current: Identity,
        direction: Direction,
        references: usize,
    },
    CurrentEntryMissing {
        current: Identity,
    },

    // Rule table
    RuleOverride {
        reference: u32,
        rule: String,
        target: Identity,
    },
    AmbiguousRule {
        reference: u32,
        chosen: String,
        outranked: Vec<String>,
    },
    SuppressedByRegionRule {
        reference: u32,
        rule: String,
        required_region: Option<Region>,
    },
    Synthesized {
        reference: u32,
        target: Identity,
        name: String,
    },

    // Default matching
    DefaultMatch {
        reference: u32,
        resolved: Identity,
        source: MatchSource,
    },
    UnresolvableReference {
        reference: u32,
        name: String,
    },
    DuplicateDropped {
        resolved: Identity,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventBus {
    events: Vec<ResolutionEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: ResolutionEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[ResolutionEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append another bus, keeping order.
    pub fn extend(&mut self, other: EventBus) {
        self.events.extend(other.events);
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Print all events in debug format with a custom prefix message.
    pub fn print_debug_with_message(&self, message: &str) {
        println!("{}", message);
        self.print_debug();
    }
}

impl std::fmt::Display for EventBus {
    /// Format the EventBus for printing. Shows debug format of all events.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_bus_display_lists_events() {
        let mut event_bus = EventBus::new();
        event_bus.push(ResolutionEvent::CurrentEntryMissing {
            current: Identity::standard(25),
        });
        event_bus.push(ResolutionEvent::UnresolvableReference {
            reference: 9999,
            name: "Inconnu".to_string(),
        });

        assert!(!event_bus.is_empty());
        assert_eq!(event_bus.len(), 2);

        let display_output = format!("{}", event_bus);
        assert!(display_output.contains("CurrentEntryMissing"));
        assert!(display_output.contains("UnresolvableReference"));
    }
}
