use std::time::Duration;

use periphsim_core::{Channel, ChannelError, LogStore, SharedChannel, Wire, WireEvent};

fn shared<const N: usize>() -> SharedChannel<LogStore, N> {
    let mut channel = Channel::<_, N>::with_capacity(LogStore::default());
    channel.initialize().unwrap();
    SharedChannel::new(channel)
}

#[test]
fn clones_share_one_buffer() {
    let producer = shared::<16>();
    let consumer = producer.clone();

    producer.inject_received(b"hi");
    assert!(consumer.is_available());
    assert_eq!(consumer.receive_byte(), Ok(b'h'));
    assert_eq!(consumer.receive_byte(), Ok(b'i'));
    assert_eq!(producer.receive_byte(), Err(ChannelError::Timeout));
}

#[test]
fn wire_delivers_in_order() {
    let channel = shared::<64>();
    let mut wire = Wire::attach(channel.clone());

    wire.deliver(b"abc".as_slice()).unwrap();
    wire.deliver(b"def".as_slice()).unwrap();
    for _ in 0..2 {
        let event = wire.events().recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(event, WireEvent::Admitted { offered: 3, admitted: 3 });
    }

    let mut received = Vec::new();
    while let Ok(byte) = channel.receive_byte() {
        received.push(byte);
    }
    assert_eq!(received, b"abcdef");

    wire.close();
    assert_eq!(
        wire.events().recv_timeout(Duration::from_secs(5)),
        Ok(WireEvent::Closed)
    );
    assert_eq!(wire.deliver(vec![1u8]), Err(ChannelError::WireClosed));
}

#[test]
fn wire_reports_overflow() {
    let channel = shared::<4>();
    let wire = Wire::attach(channel.clone());

    wire.deliver(vec![1u8, 2, 3, 4, 5]).unwrap();
    let event = wire.events().recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(event, WireEvent::Admitted { offered: 5, admitted: 3 });
    assert_eq!(channel.available(), 3);
    assert!(channel.lock().sink().lines().contains(&"[UART] 警告: 接收缓冲区已满"));
}
