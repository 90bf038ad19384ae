// src/ffi.rs
// =============================================================================
// C-callable wrapper around `crawl`.
//
//   char **urls = harvester_crawl("example.com", 5, 2, false, false, "");
//   for (char **p = urls; *p != NULL; p++) puts(*p);
//   harvester_free_results(urls);
//
// The returned array and its strings are allocated by Rust, so they must be
// released with harvester_free_results, never with free().
// =============================================================================

use std::ffi::{c_char, c_int, CStr, CString};
use std::ptr;

use anyhow::{Context, Result};
use tracing::warn;

use crate::crawl::{crawl, CrawlRequest};

/// Runs a full crawl and returns a NULL-terminated array of C strings.
///
/// A null `url` or an internal failure yields an array holding only the
/// terminator. Negative `threads`/`depth` are clamped to 1 and 0.
///
/// # Safety
///
/// `url` and `raw_headers` must each be null or point to a valid
/// NUL-terminated string. Must not be called from inside a Tokio runtime.
#[no_mangle]
pub unsafe extern "C" fn harvester_crawl(
    url: *const c_char,
    threads: c_int,
    depth: c_int,
    include_subdomains: bool,
    insecure: bool,
    raw_headers: *const c_char,
) -> *mut *mut c_char {
    let Some(seed) = string_arg(url) else {
        return into_c_array(Vec::new());
    };

    let request = CrawlRequest {
        seed,
        threads: usize::try_from(threads).unwrap_or(1).max(1),
        max_depth: usize::try_from(depth).unwrap_or(0),
        include_subdomains,
        skip_tls_verify: insecure,
        raw_headers: string_arg(raw_headers).unwrap_or_default(),
        timeout: None,
    };

    let results = match crawl_blocking(&request) {
        Ok(results) => results,
        Err(e) => {
            warn!(error = %e, "C crawl failed");
            Vec::new()
        }
    };

    into_c_array(results)
}

/// Frees an array returned by `harvester_crawl`.
///
/// # Safety
///
/// `results` must be null or a pointer returned by `harvester_crawl` that
/// has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn harvester_free_results(results: *mut *mut c_char) {
    if results.is_null() {
        return;
    }

    let mut len = 0;
    while !(*results.add(len)).is_null() {
        drop(CString::from_raw(*results.add(len)));
        len += 1;
    }

    // +1 for the terminator
    drop(Box::from_raw(ptr::slice_from_raw_parts_mut(results, len + 1)));
}

/// Runs `crawl` to completion on a private runtime.
pub fn crawl_blocking(request: &CrawlRequest) -> Result<Vec<String>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    Ok(runtime.block_on(crawl(request)))
}

unsafe fn string_arg(raw: *const c_char) -> Option<String> {
    if raw.is_null() {
        return None;
    }
    Some(CStr::from_ptr(raw).to_string_lossy().into_owned())
}

fn into_c_array(results: Vec<String>) -> *mut *mut c_char {
    let mut pointers: Vec<*mut c_char> = results
        .into_iter()
        .filter_map(|s| CString::new(s).ok())
        .map(CString::into_raw)
        .collect();
    pointers.push(ptr::null_mut());

    Box::into_raw(pointers.into_boxed_slice()) as *mut *mut c_char
}
