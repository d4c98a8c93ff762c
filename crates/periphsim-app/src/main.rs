mod settings;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use periphsim_core::{Channel, Console};
use periphsim_gpio::{Button, ButtonEvent, Led, BUTTON_PIN, LED_PIN};

use settings::Settings;

const USAGE: &str = "usage: periphsim [--settings PATH] <uart|led|button|all> [--inject HEX]";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Demo {
    Uart,
    Led,
    Button,
    All,
}

impl std::str::FromStr for Demo {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "uart" => Self::Uart,
            "led" => Self::Led,
            "button" => Self::Button,
            "all" => Self::All,
            other => bail!("unknown demo {other:?}\n{USAGE}"),
        })
    }
}

#[derive(Debug)]
struct Args {
    settings: Option<PathBuf>,
    demo: Demo,
    inject: Option<Vec<u8>>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut settings = None;
        let mut demo = None;
        let mut inject = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--settings" => {
                    let path = args.next().context("--settings needs a path")?;
                    settings = Some(PathBuf::from(path));
                }
                "--inject" => {
                    let text = args.next().context("--inject needs hex bytes")?;
                    let bytes = hex::decode(text.replace(' ', ""))
                        .with_context(|| format!("invalid hex payload {text:?}"))?;
                    inject = Some(bytes);
                }
                "-h" | "--help" => {
                    println!("{USAGE}");
                    std::process::exit(0);
                }
                other => demo = Some(other.parse()?),
            }
        }

        Ok(Self {
            settings,
            demo: demo.unwrap_or(Demo::All),
            inject,
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse(std::env::args().skip(1))?;
    let settings = match args.settings.clone().or_else(Settings::default_path) {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };

    match args.demo {
        Demo::Uart => uart_demo(&settings, args.inject.as_deref())?,
        Demo::Led => led_demo(&settings)?,
        Demo::Button => button_demo(&settings)?,
        Demo::All => {
            led_demo(&settings)?;
            println!();
            button_demo(&settings)?;
            println!();
            uart_demo(&settings, args.inject.as_deref())?;
        }
    }
    Ok(())
}

fn uart_demo(settings: &Settings, inject: Option<&[u8]>) -> Result<()> {
    println!("=== UART串口通信示例 ===\n");

    let config = settings.channel.to_config()?;
    if let Err(e) = config.validate() {
        log::warn!("channel settings out of range, using them anyway: {e}");
    }

    let mut channel = Channel::new(Console);
    channel.initialize_with(config).context("UART初始化失败")?;

    println!("\n--- 测试1: 发送单个字节 ---");
    for byte in *b"ABC" {
        channel.send_byte(byte)?;
    }

    println!("\n--- 测试2: 发送字符串 ---");
    channel.send_string("Hello, UART!")?;

    println!("\n--- 测试3: 发送数据缓冲区 ---");
    channel.send_buffer([0x01u8, 0x02, 0x03, 0x04, 0x05])?;

    println!("\n--- 测试4: 模拟接收数据 ---");
    channel.inject_received(inject.unwrap_or(b"TEST"));
    println!("读取接收缓冲区:");
    channel.drain();

    println!("\n--- 测试5: 模拟数据回显 ---");
    channel.inject_received(b"ECHO");
    println!("回显接收到的数据:");
    while channel.is_available() {
        let byte = channel.receive_byte()?;
        print!("回显: ");
        channel.send_byte(byte)?;
    }

    println!("\n=== 示例结束 ===");
    Ok(())
}

fn led_demo(settings: &Settings) -> Result<()> {
    let interval = Duration::from_millis(settings.blink_interval_ms);

    println!("=== LED闪烁示例 ===");
    println!(
        "闪烁次数: {}, 间隔: {}ms\n",
        settings.blink_count, settings.blink_interval_ms
    );

    let mut led = Led::new(LED_PIN, Console);
    led.initialize().context("LED初始化失败")?;

    for i in 0..settings.blink_count {
        println!("第 {} 次闪烁", i + 1);
        led.on();
        std::thread::sleep(interval);
        led.off();
        std::thread::sleep(interval);
    }

    println!("\n=== 示例结束 ===");
    Ok(())
}

fn button_demo(settings: &Settings) -> Result<()> {
    println!("=== 按键输入检测示例 ===\n");

    let mut button = Button::new(BUTTON_PIN, Duration::from_millis(settings.debounce_ms), Console);
    button.initialize().context("按键初始化失败")?;

    println!("\n开始模拟按键检测...\n");

    let mut press_count = 0u32;
    for i in 0..settings.press_cycles {
        println!("--- 第 {} 次检测 ---", i + 1);

        println!("模拟: 按下按键");
        button.simulate_press();
        if button.poll_event() == ButtonEvent::Pressed {
            press_count += 1;
            println!("检测到按键按下！总计: {press_count} 次");
        }
        std::thread::sleep(Duration::from_millis(100));

        println!("模拟: 释放按键");
        button.simulate_release();
        button.poll_event();

        println!();
        std::thread::sleep(Duration::from_millis(200));
    }

    println!("=== 示例结束 ===");
    println!("总共检测到 {press_count} 次按键按下");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args> {
        Args::parse(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn defaults_to_all_demos() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.demo, Demo::All);
        assert!(args.settings.is_none());
        assert!(args.inject.is_none());
    }

    #[test]
    fn inject_payload_is_hex_decoded() {
        let args = parse(&["uart", "--inject", "48 69 21"]).unwrap();
        assert_eq!(args.demo, Demo::Uart);
        assert_eq!(args.inject.as_deref(), Some(&b"Hi!"[..]));
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(parse(&["blink"]).is_err());
        assert!(parse(&["uart", "--inject", "zz"]).is_err());
        assert!(parse(&["--settings"]).is_err());
    }
}
