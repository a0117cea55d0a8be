mod common;

use common::{driver, driver_with, Log, MockBus, Op};
use mcp2515_can::registers::{CANCTRL_REG, CANSTAT_REG};
use mcp2515_can::{Config, Mcp2515Error, OperatingMode};

fn chip_in_configuration_mode() -> MockBus {
    let mut bus = MockBus::new();
    bus.follow_canctrl = false;
    bus.registers[CANSTAT_REG as usize] = 0x80;
    bus
}

#[test]
fn switch_returns_after_the_read_that_shows_the_mode() {
    for n in 1..=5usize {
        let mut bus = chip_in_configuration_mode();
        bus.canstat_script.extend(std::iter::repeat(0x80).take(n - 1));
        bus.canstat_script.push_back(0x40);

        let mut can = driver(bus);
        assert_eq!(can.switch_mode(&mut Log::default(), OperatingMode::Loopback), Ok(()));

        let (bus, _) = can.release();
        assert_eq!(bus.canstat_reads(), n);
        assert_eq!(bus.writes(), vec![(CANCTRL_REG, 0x40)]);
    }
}

#[test]
fn normal_mode_is_not_confirmed_while_configuration_bit_is_set() {
    let mut bus = chip_in_configuration_mode();
    bus.canstat_script.extend([0x80, 0x80, 0x00]);

    let mut can = driver(bus);
    assert_eq!(can.switch_mode(&mut Log::default(), OperatingMode::Normal), Ok(()));

    let (bus, _) = can.release();
    assert_eq!(bus.canstat_reads(), 3);
    assert_eq!(bus.count(&Op::Write(CANCTRL_REG, 0x00)), 1);
}

#[test]
fn switch_gives_up_when_the_budget_runs_out() {
    let config = Config {
        mode_switch_wait_ms: 10,
        ..Config::default()
    };
    let mut can = driver_with(chip_in_configuration_mode(), config);
    assert_eq!(
        can.switch_mode(&mut Log::default(), OperatingMode::Sleep),
        Err(Mcp2515Error::Timeout)
    );

    let (bus, delay) = can.release();
    assert_eq!(bus.canstat_reads(), 11);
    assert_eq!(delay.total_ms(), 10);
    assert_eq!(bus.writes().len(), 1);
}

#[test]
fn one_shot_request_sets_the_osm_bit() {
    let mut can = driver(MockBus::new());
    assert_eq!(
        can.switch_mode(&mut Log::default(), OperatingMode::NormalWithOneShot),
        Ok(())
    );
    assert_eq!(can.current_mode(), Ok(Some(OperatingMode::Normal)));

    let (bus, _) = can.release();
    assert_eq!(bus.writes(), vec![(CANCTRL_REG, 0x08)]);
}

#[test]
fn every_mode_round_trips_through_the_chip() {
    let mut can = driver(MockBus::new());
    for mode in [
        OperatingMode::Configuration,
        OperatingMode::Loopback,
        OperatingMode::ListenOnly,
        OperatingMode::Sleep,
        OperatingMode::Normal,
    ] {
        can.switch_mode(&mut Log::default(), mode).unwrap();
        assert_eq!(can.current_mode(), Ok(Some(mode)));
    }
}

#[test]
fn confirmed_switch_is_logged_when_debugging() {
    let config = Config {
        debug: true,
        ..Config::default()
    };
    let mut log = Log::default();
    let mut can = driver_with(MockBus::new(), config);
    can.switch_mode(&mut log, OperatingMode::Loopback).unwrap();
    assert!(log.0.contains("Switched to mode Loopback, status 64"));
}
