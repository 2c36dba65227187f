use tm1637_i2c::display::{Brightness, Tm1637};
use tm1637_i2c::segments::{DIGITS, SEGMENT_DECIMAL_POINT};
use tm1637_i2c::{BusError, BusResult, BusTransport, Transaction};

#[derive(Debug, Clone, Eq, PartialEq)]
enum Recorded {
    Write { opcode: u8, payload: Vec<u8> },
    CommitRead { opcode: u8, len: usize },
}

/// Records every transaction; optionally starts failing once `fail_after`
/// transactions have gone through.
#[derive(Debug, Default)]
struct MockBus {
    transactions: Vec<Recorded>,
    fail_after: Option<usize>,
}

impl BusTransport for MockBus {
    fn transfer(&mut self, opcode: u8, transaction: Transaction<'_>) -> BusResult<()> {
        if let Some(limit) = self.fail_after {
            if self.transactions.len() >= limit {
                return Err(BusError::Incomplete);
            }
        }
        self.transactions.push(match transaction {
            Transaction::Write(payload) => Recorded::Write {
                opcode,
                payload: payload.to_vec(),
            },
            Transaction::CommitRead { len } => Recorded::CommitRead { opcode, len },
        });
        Ok(())
    }
}

fn new_display() -> Tm1637<MockBus> {
    Tm1637::new(MockBus::default()).unwrap()
}

#[test]
fn construction_latches_init_command() {
    let display = new_display();
    assert_eq!(display.digits(), [0xFF; 4]);
    assert_eq!(display.brightness(), Brightness::Level1);

    let bus = display.release();
    assert_eq!(
        bus.transactions,
        vec![Recorded::CommitRead {
            opcode: 0x08,
            len: 6
        }]
    );
}

#[test]
fn show_number_renders_each_digit() {
    let mut display = new_display();
    display.show_number(1234, false).unwrap();

    let bus = display.release();
    assert_eq!(
        bus.transactions[1],
        Recorded::Write {
            opcode: 0x40,
            payload: vec![DIGITS[1], DIGITS[2], DIGITS[3], DIGITS[4], 0, 0],
        }
    );
}

#[test]
fn show_number_pads_with_leading_zeros_and_lights_colon() {
    let mut display = new_display();
    display.show_number(7, true).unwrap();

    assert_eq!(
        display.digits(),
        [
            DIGITS[0],
            DIGITS[0] | SEGMENT_DECIMAL_POINT,
            DIGITS[0],
            DIGITS[7],
        ]
    );
}

#[test]
fn show_number_ignores_sign() {
    let mut negative = new_display();
    let mut positive = new_display();
    negative.show_number(-42, false).unwrap();
    positive.show_number(42, false).unwrap();

    assert_eq!(negative.digits(), positive.digits());
    assert_eq!(
        negative.release().transactions,
        positive.release().transactions
    );
}

#[test]
fn show_number_truncates_to_last_four_digits() {
    let mut display = new_display();
    display.show_number(12345, false).unwrap();

    assert_eq!(
        display.digits(),
        [DIGITS[2], DIGITS[3], DIGITS[4], DIGITS[5]]
    );
}

#[test]
fn display_always_transmits_six_bytes() {
    let mut display = new_display();
    display.display([0xAA, 0xBB, 0xCC, 0xDD]).unwrap();
    display.clear().unwrap();

    let bus = display.release();
    assert_eq!(bus.transactions.len(), 3);
    for recorded in &bus.transactions[1..] {
        match recorded {
            Recorded::Write { payload, .. } => {
                assert_eq!(payload.len(), 6);
                assert_eq!(&payload[4..], &[0, 0]);
            }
            other => panic!("unexpected transaction {other:?}"),
        }
    }
}

#[test]
fn brightness_change_restores_display_content() {
    let mut display = new_display();
    display.display([1, 2, 3, 4]).unwrap();
    display.set_brightness(Brightness::Level6).unwrap();

    assert_eq!(display.brightness(), Brightness::Level6);
    let bus = display.release();
    assert_eq!(
        bus.transactions[1..],
        [
            Recorded::Write {
                opcode: 0x40,
                payload: vec![1, 2, 3, 4, 0, 0],
            },
            Recorded::CommitRead {
                opcode: 0x78,
                len: 6,
            },
            Recorded::Write {
                opcode: 0x40,
                payload: vec![1, 2, 3, 4, 0, 0],
            },
        ]
    );
}

#[test]
fn brightness_commands_use_level_encodings() {
    let levels = [
        (Brightness::Level1, 0x08),
        (Brightness::Level2, 0x48),
        (Brightness::Level3, 0x28),
        (Brightness::Level4, 0x68),
        (Brightness::Level5, 0x58),
        (Brightness::Level6, 0x78),
    ];
    for (level, opcode) in levels {
        let mut display = new_display();
        display.set_brightness(level).unwrap();

        let bus = display.release();
        assert_eq!(bus.transactions[1], Recorded::CommitRead { opcode, len: 6 });
    }
}

#[test]
fn brightness_from_level_bounds() {
    assert_eq!(Brightness::from_level(0), None);
    assert_eq!(Brightness::from_level(1), Some(Brightness::Level1));
    assert_eq!(Brightness::from_level(6), Some(Brightness::Level6));
    assert_eq!(Brightness::from_level(7), None);
}

#[test]
fn transport_failure_propagates() {
    let bus = MockBus {
        fail_after: Some(0),
        ..Default::default()
    };
    assert_eq!(Tm1637::new(bus).unwrap_err(), BusError::Incomplete);

    let mut display = Tm1637::new(MockBus {
        fail_after: Some(1),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(
        display.show_number(88, false).unwrap_err(),
        BusError::Incomplete
    );
    // The attempted pattern is recorded even though the transfer failed.
    assert_eq!(
        display.digits(),
        [DIGITS[0], DIGITS[0], DIGITS[8], DIGITS[8]]
    );
}

#[test]
fn failed_restore_keeps_brightness_state() {
    // Init, display and the brightness command go through; the restoring
    // write is the one that fails.
    let mut display = Tm1637::new(MockBus {
        fail_after: Some(3),
        ..Default::default()
    })
    .unwrap();
    display.display([9, 9, 9, 9]).unwrap();

    let err = display.set_brightness(Brightness::Level3).unwrap_err();
    assert_eq!(err, BusError::Incomplete);
    // The command already executed on hardware; the level is not rolled back.
    assert_eq!(display.brightness(), Brightness::Level3);
    assert_eq!(display.digits(), [9, 9, 9, 9]);
}
