use once_cell::sync::Lazy;

use crate::util::{Event, EventMap, Occurrence};
use crate::Distribution;

fn die(sides: u32) -> Distribution {
    let events: EventMap = (1..=sides)
        .map(|side| (Event::from(side), Occurrence::from(1u8)))
        .collect();
    Distribution::from_map_unchecked(events)
}

pub static D4: Lazy<Distribution> = Lazy::new(|| die(4));
pub static D6: Lazy<Distribution> = Lazy::new(|| die(6));
pub static D8: Lazy<Distribution> = Lazy::new(|| die(8));
pub static D10: Lazy<Distribution> = Lazy::new(|| die(10));
pub static D12: Lazy<Distribution> = Lazy::new(|| die(12));
pub static D20: Lazy<Distribution> = Lazy::new(|| die(20));
pub static D100: Lazy<Distribution> = Lazy::new(|| die(100));

pub fn d4() -> Distribution {
    D4.clone()
}

pub fn d6() -> Distribution {
    D6.clone()
}

pub fn d8() -> Distribution {
    D8.clone()
}

pub fn d10() -> Distribution {
    D10.clone()
}

pub fn d12() -> Distribution {
    D12.clone()
}

pub fn d20() -> Distribution {
    D20.clone()
}

pub fn d100() -> Distribution {
    D100.clone()
}
