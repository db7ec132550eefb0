//! Synthetic KakaoTalk transcript generator for stress testing kakaoday.
//!
//! Usage: cargo run --features gen-test --bin gen_test -- [messages] [output]
//! Example: cargo run --features gen-test --bin gen_test -- 100000 heavy_kakao.txt

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use rand::Rng;
use rand::seq::SliceRandom;
use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};

const WEEKDAYS: [&str; 7] = ["월", "화", "수", "목", "금", "토", "일"];

const SENDERS: &[&str] = &[
    "철수",
    "영희",
    "민수",
    "Alice",
    "Bob",
    "이름에, 쉼표",
    "콜론 : 이름",
    "🔥불꽃🔥",
];

const NOTICES: &[&str] = &[
    "님이 들어왔습니다.",
    "님이 나갔습니다.",
];

const EMOJIS: &[&str] = &["😀", "😂", "🥰", "🤔", "😱", "🔥", "👍", "❤️", "👨‍👩‍👧‍👦"];

fn main() {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map_or("heavy_kakao.txt", String::as_str);

    println!("🧪 KakaoTalk Transcript Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {}", count);
    println!("   Output:   {}", output);
    println!();

    generate(count, output);
}

fn generate(count: usize, output: &str) {
    let file = File::create(output).expect("Failed to create output file");
    let mut writer = BufWriter::with_capacity(1024 * 1024, file); // 1MB buffer

    let mut rng = rand::thread_rng();
    let start = std::time::Instant::now();
    let mut bytes_written: usize = 0;

    let mut now = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .expect("valid start instant");

    let header = format!(
        "\u{feff}스트레스 테스트 님과 카카오톡 대화\n저장한 날짜 : {}\n\n",
        now.format("%Y-%m-%d %H:%M:%S")
    );
    writer.write_all(header.as_bytes()).unwrap();
    bytes_written += header.len();

    let mut last_day = None;

    for i in 0..count {
        // Mostly small gaps, sometimes a jump across one or more nights
        let gap = match rng.gen_range(0..100) {
            0..=89 => rng.gen_range(0..=15),
            90..=98 => rng.gen_range(60..=600),
            _ => rng.gen_range(1440..=4320),
        };
        now += Duration::minutes(gap);

        let mut chunk = String::new();
        if last_day != Some(now.date()) {
            chunk.push_str(&day_separator(now));
            last_day = Some(now.date());
        }

        let sender = SENDERS.choose(&mut rng).unwrap();
        if i % 500 == 250 {
            let notice = NOTICES.choose(&mut rng).unwrap();
            chunk.push_str(&format!("{}, {}{}\n", kakao_timestamp(now), sender, notice));
        } else {
            chunk.push_str(&format!(
                "{}, {} : {}\n",
                kakao_timestamp(now),
                sender,
                generate_message(&mut rng, i)
            ));
        }

        bytes_written += chunk.len();
        writer.write_all(chunk.as_bytes()).unwrap();

        if (i + 1) % 10000 == 0 {
            let elapsed = start.elapsed().as_secs_f64();
            let mps = (i + 1) as f64 / elapsed;
            let mb = bytes_written as f64 / 1_000_000.0;
            eprint!(
                "\r   Generated {}/{} ({:.1} MB, {:.0} msg/s)",
                i + 1,
                count,
                mb,
                mps
            );
        }
    }

    writer.flush().unwrap();

    let elapsed = start.elapsed();
    let mb = bytes_written as f64 / 1_000_000.0;

    println!("\n\n✅ Done!");
    println!("   Size: {:.2} MB", mb);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());
    println!("   Last: {}", now);
}

/// `2024년 5월 1일 오후 3:07`
fn kakao_timestamp(at: NaiveDateTime) -> String {
    let (pm, hour12) = at.hour12();
    format!(
        "{} {} {}:{:02}",
        at.format("%Y년 %-m월 %-d일"),
        if pm { "오후" } else { "오전" },
        hour12,
        at.minute()
    )
}

/// `2024년 5월 1일 수요일`
fn day_separator(at: NaiveDateTime) -> String {
    let weekday = WEEKDAYS[at.weekday().num_days_from_monday() as usize];
    format!("\n{} {}요일\n", at.format("%Y년 %-m월 %-d일"), weekday)
}

fn generate_message(rng: &mut impl Rng, index: usize) -> String {
    match index % 12 {
        // Normal messages
        0..=5 => format!("일반 메시지 #{} 입니다", index),

        // Text that looks like a timestamp but is not at line start
        6 => format!("회의는 2024년 3월 1일 오전 10:00에 해요 #{}", index),

        // Multi-line message (continuation lines)
        7 => format!("여러 줄 메시지 #{}\n두 번째 줄\n세 번째 줄", index),

        // Emoji spam
        8 => {
            let emojis: String = (0..30)
                .map(|_| *EMOJIS.choose(rng).unwrap())
                .collect::<Vec<_>>()
                .join("");
            format!("이모지: {} #{}", emojis, index)
        }

        // Long message
        9 => {
            let padding: String = (0..10_000).map(|_| '가').collect();
            format!("긴 메시지 #{}: {}", index, padding)
        }

        // Mixed scripts and punctuation
        10 => format!("Mixed: 안녕 Hello 你好; \"quotes\" #{}", index),

        // Empty-ish
        _ => "   ".to_string(),
    }
}
