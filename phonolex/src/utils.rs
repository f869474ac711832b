//! ユーティリティ関数を提供するモジュール
//!
//! 主に外部コマンドの探索を行います。

use std::env;
use std::path::{Path, PathBuf};

/// 実行可能ファイルを探します。
///
/// パス区切りを含む場合はそのパスを直接確認し、含まない場合は環境変数 `PATH`
/// の各ディレクトリを順に探します。`PATH` の要素を囲む引用符は無視されます。
///
/// # 引数
///
/// * `program` - プログラム名またはパス
///
/// # 戻り値
///
/// 見つかった実行可能ファイルのパス。見つからない場合は `None`
///
/// # 例
///
/// ```
/// # use phonolex::utils::which;
/// assert_eq!(which("surely-not-an-installed-program-0451"), None);
/// ```
pub fn which<P>(program: P) -> Option<PathBuf>
where
    P: AsRef<Path>,
{
    let program = program.as_ref();
    if program.components().count() > 1 {
        return is_executable(program).then(|| program.to_path_buf());
    }

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| match dir.to_str() {
            Some(s) => PathBuf::from(s.trim_matches('"')),
            None => dir,
        })
        .flat_map(|dir| candidates(&dir, program))
        .find(|path| is_executable(path))
}

fn candidates(dir: &Path, program: &Path) -> Vec<PathBuf> {
    let mut paths = vec![dir.join(program)];
    if !env::consts::EXE_SUFFIX.is_empty() {
        let mut name = program.as_os_str().to_owned();
        name.push(env::consts::EXE_SUFFIX);
        paths.push(dir.join(name));
    }
    paths
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
