//! デコーダの子プロセスと実行時間の監視

use std::process::{Child, ChildStdout, Command};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::errors::{PhonolexError, Result};

/// 時間制限つきで終了を待つときの確認間隔
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// 実行時間を過ぎた子プロセスを強制終了するスレッド
struct Watchdog {
    done_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
    timed_out: Arc<AtomicBool>,
    timeout: Duration,
}

impl Watchdog {
    fn start(child: Arc<Mutex<Child>>, timeout: Duration) -> Self {
        let (done_tx, done_rx) = mpsc::channel::<()>();
        let timed_out = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&timed_out);
        let handle = thread::spawn(move || {
            if let Err(RecvTimeoutError::Timeout) = done_rx.recv_timeout(timeout) {
                let mut child = child.lock().unwrap_or_else(PoisonError::into_inner);
                if let Ok(Some(_)) = child.try_wait() {
                    return;
                }
                flag.store(true, Ordering::SeqCst);
                if let Err(e) = child.kill() {
                    log::error!("[phonolex] Failed to kill the decoder: {e}");
                }
            }
        });
        Self {
            done_tx: Some(done_tx),
            handle: Some(handle),
            timed_out,
            timeout,
        }
    }

    /// 監視を終了し、時間切れで強制終了したかどうかを返します。
    fn stop(&mut self) -> bool {
        // Dropping the sender wakes the thread up with `Disconnected`.
        self.done_tx.take();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.join() {
                log::error!("[phonolex] Watchdog thread panicked: {:?}", e);
            }
        }
        self.timed_out.load(Ordering::SeqCst)
    }
}

/// 実行中のデコーダプロセス
///
/// 終了処理を経ずにドロップされた場合、プロセスは強制終了されます。
pub(crate) struct DecoderProcess {
    program: String,
    child: Arc<Mutex<Child>>,
    watchdog: Option<Watchdog>,
    finished: bool,
}

impl DecoderProcess {
    /// コマンドを起動し、標準出力を取り出します。
    ///
    /// コマンドの標準出力はパイプに設定されている必要があります。
    pub(crate) fn spawn(
        program: String,
        command: &mut Command,
        timeout: Option<Duration>,
    ) -> Result<(Self, ChildStdout)> {
        let mut child = command.spawn()?;
        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(PhonolexError::invalid_state(
                "decoder stdout",
                "standard output is not piped",
            ));
        };
        let child = Arc::new(Mutex::new(child));
        let watchdog = timeout.map(|timeout| Watchdog::start(Arc::clone(&child), timeout));
        Ok((
            Self {
                program,
                child,
                watchdog,
                finished: false,
            },
            stdout,
        ))
    }

    fn child(&self) -> MutexGuard<'_, Child> {
        self.child.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 出力を読み終えた後にプロセスの終了を待ちます。
    ///
    /// 監視スレッドはプロセスを回収するまで止めないため、標準出力を閉じた後も
    /// 動き続けるデコーダも制限時間で強制終了されます。
    ///
    /// # エラー
    ///
    /// 時間切れで強制終了していた場合は [`PhonolexError::DecoderTimeout`] を返します。
    /// 0以外の終了ステータスはエラーにせず、警告として記録します。
    pub(crate) fn finish(&mut self) -> Result<()> {
        self.finished = true;
        let status = if self.watchdog.is_some() {
            // The lock is released between polls so that the watchdog can kill the child.
            loop {
                if let Some(status) = self.child().try_wait()? {
                    break status;
                }
                thread::sleep(POLL_INTERVAL);
            }
        } else {
            self.child().wait()?
        };
        let timed_out = match self.watchdog.as_mut() {
            Some(watchdog) => watchdog.stop(),
            None => false,
        };
        if timed_out {
            let timeout = self.watchdog.as_ref().map(|w| w.timeout).unwrap_or_default();
            return Err(PhonolexError::DecoderTimeout(timeout));
        }
        if !status.success() {
            log::warn!("{} exited with {}", self.program, status);
        }
        Ok(())
    }

    /// プロセスを強制終了します。
    pub(crate) fn kill(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        {
            let mut child = self.child();
            let _ = child.kill();
            let _ = child.wait();
        }
        if let Some(watchdog) = self.watchdog.as_mut() {
            watchdog.stop();
        }
    }
}

impl Drop for DecoderProcess {
    fn drop(&mut self) {
        self.kill();
    }
}
