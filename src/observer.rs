use std::sync::mpsc::SyncSender;

use crate::maze::{Coord, Walls};

/// How the solver is marking an edge between two cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeMarking {
    /// The edge is being tentatively walked.
    Forward,
    /// The walk along the edge led nowhere and is retracted.
    Undo,
}

/// A change reported by the generator or the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeEvent {
    CellUpdated { coord: Coord, walls: Walls },
    EdgeMark {
        from: Coord,
        to: Coord,
        marking: EdgeMarking,
    },
    Step,
}

/// Receives notifications from the maze algorithms.
///
/// Notifications are one-way: nothing an observer does is fed back into the algorithms,
/// and every method defaults to doing nothing.
pub trait MazeObserver {
    /// A cell's wall flags changed.
    fn on_cell_updated(&mut self, _coord: Coord, _walls: Walls) {}

    /// The solver walked or retracted the edge `from -> to`.
    fn on_edge_mark(&mut self, _from: Coord, _to: Coord, _marking: EdgeMarking) {}

    /// One algorithmic step happened. Useful for pacing an animation.
    fn on_step(&mut self) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl MazeObserver for NoopObserver {}

/// Forwards every notification as a [`MazeEvent`] over a bounded channel.
///
/// A full channel blocks the algorithm until the consumer catches up. Once the
/// receiver is gone events are dropped, so the algorithm still runs to completion.
pub struct ChannelObserver {
    sender: SyncSender<MazeEvent>,
}

impl ChannelObserver {
    pub fn new(sender: SyncSender<MazeEvent>) -> Self {
        ChannelObserver { sender }
    }

    fn send(&self, event: MazeEvent) {
        let _ = self.sender.send(event);
    }
}

impl MazeObserver for ChannelObserver {
    fn on_cell_updated(&mut self, coord: Coord, walls: Walls) {
        self.send(MazeEvent::CellUpdated { coord, walls });
    }

    fn on_edge_mark(&mut self, from: Coord, to: Coord, marking: EdgeMarking) {
        self.send(MazeEvent::EdgeMark { from, to, marking });
    }

    fn on_step(&mut self) {
        self.send(MazeEvent::Step);
    }
}

/// Keeps every event in order, for inspection in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingObserver {
    pub events: Vec<MazeEvent>,
}

#[cfg(test)]
impl MazeObserver for RecordingObserver {
    fn on_cell_updated(&mut self, coord: Coord, walls: Walls) {
        self.events.push(MazeEvent::CellUpdated { coord, walls });
    }

    fn on_edge_mark(&mut self, from: Coord, to: Coord, marking: EdgeMarking) {
        self.events.push(MazeEvent::EdgeMark { from, to, marking });
    }

    fn on_step(&mut self) {
        self.events.push(MazeEvent::Step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_observer_forwards_in_order() {
        let (tx, rx) = std::sync::mpsc::sync_channel(8);
        let mut observer = ChannelObserver::new(tx);
        observer.on_cell_updated((1, 2), Walls::CLOSED);
        observer.on_edge_mark((0, 0), (1, 0), EdgeMarking::Undo);
        observer.on_step();
        drop(observer);

        let events = rx.iter().collect::<Vec<_>>();
        assert_eq!(
            events,
            vec![
                MazeEvent::CellUpdated {
                    coord: (1, 2),
                    walls: Walls::CLOSED
                },
                MazeEvent::EdgeMark {
                    from: (0, 0),
                    to: (1, 0),
                    marking: EdgeMarking::Undo
                },
                MazeEvent::Step,
            ]
        );
    }

    #[test]
    fn test_channel_observer_survives_dropped_receiver() {
        let (tx, rx) = std::sync::mpsc::sync_channel(1);
        drop(rx);
        let mut observer = ChannelObserver::new(tx);
        // Must neither panic nor block
        observer.on_step();
        observer.on_step();
    }
}
