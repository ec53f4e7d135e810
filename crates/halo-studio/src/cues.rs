use std::cell::RefCell;
use std::rc::Rc;

use halo_ui::prelude::{EventBus, RingEventKind, SubscriptionId};

/// Sound cue name for an event.
pub fn cue_for(kind: RingEventKind) -> &'static str {
    match kind {
        RingEventKind::RingCompleted => "coin07",
        RingEventKind::AllRingsCompleted => "winning",
    }
}

/// Subscriber standing in for audio playback: logs and records cue names.
pub struct CueLogger {
    played: Rc<RefCell<Vec<&'static str>>>,
    subscription: SubscriptionId,
}

impl CueLogger {
    pub fn attach(bus: &EventBus) -> Self {
        let played = Rc::new(RefCell::new(Vec::new()));
        let sink = played.clone();
        let subscription = bus.subscribe(move |event| {
            let cue = cue_for(event.kind);
            log::info!("cue: {cue} ({} from {})", event.kind, event.group);
            sink.borrow_mut().push(cue);
        });
        Self { played, subscription }
    }

    pub fn played(&self) -> Vec<&'static str> {
        self.played.borrow().clone()
    }

    pub fn detach(self, bus: &EventBus) {
        bus.unsubscribe(self.subscription);
    }
}
