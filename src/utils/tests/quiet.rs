use std::io;
use std::sync::{Arc, Mutex};

use tracing::{Level, debug, info, warn};

use crate::utils::quiet;

/// 收集日志输出的内存缓冲
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}

#[test]
fn test_quiet_discards_events_inside_scope() {
    let (value, logs) = capture(|| {
        info!("静默之前");
        let value = quiet(|| {
            warn!("静默之中");
            debug!(step = 1, "静默之中的调试信息");
            7
        });
        info!("静默之后");
        value
    });

    assert_eq!(value, 7);
    assert!(logs.contains("静默之前"));
    assert!(logs.contains("静默之后"));
    assert!(!logs.contains("静默之中"));
}

#[test]
fn test_quiet_passes_errors_through() {
    let (result, logs) = capture(|| {
        quiet(|| -> Result<(), String> {
            warn!("不应出现");
            Err("内部错误".to_string())
        })
    });

    assert_eq!(result, Err("内部错误".to_string()));
    assert!(logs.is_empty());
}
