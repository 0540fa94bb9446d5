use sheetcal::sheet::{OptionItem, OptionSheet};

pub fn counseling_slots() -> OptionSheet {
    OptionSheet::new(vec![
        OptionItem::new("0900", "09:00 - 10:00"),
        OptionItem::new("1030", "10:30 - 11:30"),
        OptionItem::new("1300", "13:00 - 14:00"),
        OptionItem::new("1500", "15:00 - 16:00"),
        OptionItem::new("1630", "16:30 - 17:30"),
    ])
    .with_disabled([2])
}
