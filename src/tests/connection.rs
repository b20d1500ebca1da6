use std::cell::RefCell;
use std::convert::TryFrom;
use std::rc::Rc;

use heapless::String;

use crate::connection::{Connection, ConnectionState, RECONNECT_DELAY_MS};
use crate::wifi::{
    AccessPoint, Authentication, ConnectOptions, ScanOptions, Timer, WifiMessage, WifiStation,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Connect(String<32>),
    Disconnect,
    Close,
    Scan,
    TimerSet(u32, u32),
    TimerClear(u32),
}

type Log = Rc<RefCell<Vec<Call>>>;

struct FakeStation {
    log: Log,
}

impl WifiStation for FakeStation {
    type Error = ();

    fn connect(&mut self, options: &ConnectOptions) -> Result<(), ()> {
        self.log.borrow_mut().push(Call::Connect(options.ssid.clone()));
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), ()> {
        self.log.borrow_mut().push(Call::Disconnect);
        Ok(())
    }

    fn close(&mut self) -> Result<(), ()> {
        self.log.borrow_mut().push(Call::Close);
        Ok(())
    }

    fn scan<F>(&mut self, _options: &ScanOptions, mut callback: F) -> Result<(), ()>
    where
        F: FnMut(Option<&AccessPoint>),
    {
        self.log.borrow_mut().push(Call::Scan);
        let ap = AccessPoint {
            ssid: String::try_from("field-lab").unwrap(),
            bssid: [0x24, 0x0A, 0xC4, 0x00, 0x11, 0x22],
            rssi: -61,
            channel: 6,
            authentication: Authentication::Wpa2Psk,
            hidden: false,
        };
        callback(Some(&ap));
        callback(None);
        Ok(())
    }
}

struct FakeTimer {
    log: Log,
    next: u32,
}

impl Timer for FakeTimer {
    type Handle = u32;

    fn set(&mut self, delay_ms: u32) -> u32 {
        self.next += 1;
        self.log.borrow_mut().push(Call::TimerSet(self.next, delay_ms));
        self.next
    }

    fn clear(&mut self, handle: u32) {
        self.log.borrow_mut().push(Call::TimerClear(handle));
    }
}

type Events = Rc<RefCell<Vec<(WifiMessage, Option<i32>)>>>;

fn options() -> ConnectOptions {
    ConnectOptions {
        ssid: String::try_from("field-lab").unwrap(),
        password: String::try_from("hunter22").unwrap(),
        bssid: None,
    }
}

fn connection() -> (
    Connection<FakeStation, FakeTimer, impl FnMut(WifiMessage, Option<i32>)>,
    Log,
    Events,
) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let events: Events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    let connection = Connection::new(
        FakeStation { log: log.clone() },
        FakeTimer { log: log.clone(), next: 0 },
        options(),
        move |message, code| sink.borrow_mut().push((message, code)),
    )
    .unwrap();
    (connection, log, events)
}

fn count(log: &Log, matches: fn(&Call) -> bool) -> usize {
    log.borrow().iter().filter(|call| matches(call)).count()
}

#[test]
fn connects_on_creation() {
    let (connection, log, events) = connection();
    assert_eq!(*log.borrow(), vec![Call::Connect(options().ssid)]);
    assert_eq!(connection.state(), ConnectionState::Disconnected);
    assert!(events.borrow().is_empty());
}

#[test]
fn duplicate_disconnects_are_filtered() {
    let (mut connection, log, events) = connection();

    connection.handle_event(WifiMessage::Disconnected, Some(201));
    connection.handle_event(WifiMessage::Disconnected, Some(201));
    connection.handle_event(WifiMessage::Connected, None);
    connection.handle_event(WifiMessage::GotIp, None);
    connection.handle_event(WifiMessage::Disconnected, Some(8));

    assert_eq!(
        *events.borrow(),
        vec![
            (WifiMessage::Connected, None),
            (WifiMessage::GotIp, None),
            (WifiMessage::Disconnected, Some(8)),
        ]
    );
    assert_eq!(count(&log, |c| matches!(c, Call::TimerSet(..))), 2);
    assert_eq!(count(&log, |c| matches!(c, Call::TimerClear(..))), 1);
    assert_eq!(
        log.borrow()[1..],
        [
            Call::TimerSet(1, RECONNECT_DELAY_MS),
            Call::TimerClear(1),
            Call::TimerSet(2, RECONNECT_DELAY_MS),
        ]
    );
}

#[test]
fn ready_follows_ip_state() {
    let (mut connection, _, _) = connection();
    assert!(!connection.ready());

    connection.handle_event(WifiMessage::Connected, None);
    assert!(!connection.ready());
    connection.handle_event(WifiMessage::GotIp, None);
    assert!(connection.ready());
    connection.handle_event(WifiMessage::Disconnected, None);
    assert!(!connection.ready());
}

#[test]
fn lost_ip_drops_back_to_connected() {
    let (mut connection, _, events) = connection();

    connection.handle_event(WifiMessage::Connected, None);
    connection.handle_event(WifiMessage::GotIp, None);
    connection.handle_event(WifiMessage::LostIp, None);

    assert!(!connection.ready());
    assert_eq!(connection.state(), ConnectionState::Connected);
    assert_eq!(events.borrow().len(), 3);
}

#[test]
fn timer_reconnects_once() {
    let (mut connection, log, _) = connection();

    connection.handle_event(WifiMessage::Disconnected, None);
    connection.on_timer(7).unwrap();
    assert_eq!(count(&log, |c| matches!(c, Call::Connect(_))), 1);

    connection.on_timer(1).unwrap();
    assert_eq!(count(&log, |c| matches!(c, Call::Connect(_))), 2);

    // handle already consumed
    connection.on_timer(1).unwrap();
    assert_eq!(count(&log, |c| matches!(c, Call::Connect(_))), 2);

    // a new drop schedules a fresh timer
    connection.handle_event(WifiMessage::Disconnected, None);
    assert_eq!(log.borrow().last(), Some(&Call::TimerSet(2, RECONNECT_DELAY_MS)));
}

#[test]
fn close_cancels_and_disconnects() {
    let (mut connection, log, _) = connection();

    connection.handle_event(WifiMessage::Disconnected, None);
    connection.close().unwrap();

    assert_eq!(
        log.borrow()[1..],
        [
            Call::TimerSet(1, RECONNECT_DELAY_MS),
            Call::TimerClear(1),
            Call::Disconnect,
            Call::Close,
        ]
    );
}

#[test]
fn scan_is_forwarded() {
    let (mut connection, log, _) = connection();
    let mut found = Vec::new();
    let mut finished = false;

    connection
        .scan(&ScanOptions::default(), |ap| match ap {
            Some(ap) => found.push((ap.ssid.clone(), ap.rssi)),
            None => finished = true,
        })
        .unwrap();

    assert!(finished);
    assert_eq!(found, vec![(String::<32>::try_from("field-lab").unwrap(), -61)]);
    assert_eq!(log.borrow().last(), Some(&Call::Scan));
}
