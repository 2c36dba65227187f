use dotenv::dotenv;
use log::{debug, info};
use std::env::var;
use std::thread::sleep;
use std::time::Duration;
use time::{OffsetDateTime, UtcOffset};
use tm1637_i2c::display::{Brightness, Tm1637};
use tm1637_i2c::i2c::I2cDev;

fn main() -> eyre::Result<()> {
    dotenv().ok();
    pretty_env_logger::init();

    info!("Wall clock starting...");

    let devpath = var("CLOCK_I2C_DEV").unwrap_or_else(|_| "/dev/i2c-1".to_string());
    let level: u8 = match var("CLOCK_BRIGHTNESS") {
        Ok(value) => value.parse()?,
        Err(_) => 1,
    };
    let brightness = Brightness::from_level(level)
        .ok_or_else(|| eyre::eyre!("Brightness level must be 1-6"))?;

    // Look the offset up once; the loop then only needs UTC reads.
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    debug!("Local offset: {}", offset);

    debug!("Opening {}...", devpath);
    let bus = I2cDev::open(&devpath)?;
    let mut display = Tm1637::new(bus)?;
    display.set_brightness(brightness)?;

    info!("Clock running on {}", devpath);

    let mut colon = true;
    loop {
        let now = OffsetDateTime::now_utc().to_offset(offset);
        let hhmm = i32::from(now.hour()) * 100 + i32::from(now.minute());
        display.show_number(hhmm, colon)?;

        colon = !colon;
        sleep(Duration::from_millis(500));
    }
}
