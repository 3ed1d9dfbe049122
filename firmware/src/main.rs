#![no_main]
#![no_std]

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_time::{Delay, Duration, Ticker};
use panic_probe as _;
use thrust::{ThrusterBank, ThrusterConfig};

mod board;
mod shm;
mod storage;

use board::Board;
use shm::Shm;
use storage::FlashCell;

const SERVICE_PERIOD: Duration = Duration::from_millis(10);

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Starting ...");
    let board = Board::init();

    info!("Setting up thrusters ...");
    let config = ThrusterConfig::default();
    // Blocks for the ESC calibration sequence when the flag is unset
    let mut thrusters = match ThrusterBank::new(
        board.escs,
        &Shm,
        FlashCell::new(board.flash),
        &config,
        &mut Delay,
    ) {
        Ok(thrusters) => thrusters,
        Err(e) => {
            error!("Failed to set up thrusters: {}", e);
            panic!()
        }
    };
    info!("Done setting up thrusters: {}", thrusters.calibration());

    let mut ticker = Ticker::every(SERVICE_PERIOD);
    loop {
        // A calibration request halts here; the next boot recalibrates
        if let Err(e) = thrusters.service() {
            error!("Stopping thrusters: {}", e);
            panic!()
        }
        ticker.next().await;
    }
}
