//! C-ABI wrapper around `crud-core`.
//!
//! # Overview
//! Exposes the products/clients request builder and response parser through
//! `extern "C"` functions so a mobile host can drive the API with its own
//! HTTP stack, without linking Rust's networking or serde directly.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - One builder per row of the route table; list responses have one parser
//!   per record type, create/update/delete share `crud_parse_ack`.
//! - A single `FfiCrudResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `crud_free_*` function to release them.
//! - Strings crossing into Rust must be UTF-8. Builders return null for any
//!   other input; parsers report a non-UTF-8 body as `Deserialization`.
//!
//! # Header
//! `build.rs` runs cbindgen on every build and writes `crud_ffi.h` to
//! `OUT_DIR`. Set `CRUD_FFI_HEADER_DIR` to get a copy somewhere stable:
//!
//! ```sh
//! CRUD_FFI_HEADER_DIR=include cargo build -p crud-ffi --release
//! ```

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use crud_core::{ApiError, Client, HttpRequest, HttpResponse, Product};

use types::*;

/// Copy a C string argument. `None` if it is not valid UTF-8.
fn str_arg(ptr: *const c_char) -> Option<String> {
    unsafe { CStr::from_ptr(ptr) }.to_str().ok().map(str::to_owned)
}

/// Shared body of every builder: null-check the client, then build.
fn build_with(
    client: *const FfiCrudClient,
    build: impl FnOnce(&crud_core::CrudClient) -> Option<HttpRequest> + std::panic::UnwindSafe,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        match build(&client.inner) {
            Some(req) => FfiHttpRequest::from_core(req),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Shared body of every parser: null-check both arguments, then parse.
fn parse_with(
    client: *const FfiCrudClient,
    response: *const FfiHttpResponse,
    name: &str,
    parse: impl FnOnce(&crud_core::CrudClient, HttpResponse) -> *mut FfiCrudResult + std::panic::UnwindSafe,
) -> *mut FfiCrudResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiCrudResult::null_arg("client");
        }
        if response.is_null() {
            return FfiCrudResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match ffi_response_to_core(resp) {
            Ok(resp) => parse(&client.inner, resp),
            Err(e) => FfiCrudResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiCrudResult::panic(&format!("panic in {name}")))
}

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body is
/// read as empty.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> Result<HttpResponse, ApiError> {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        str_arg(resp.body).ok_or_else(|| {
            ApiError::DeserializationError("response body is not valid UTF-8".to_string())
        })?
    };
    Ok(HttpResponse::new(resp.status, body))
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `CrudClient` bound to `base_url`.
///
/// Returns null if `base_url` is null or not UTF-8, or if an internal panic
/// occurs.
/// The caller must free the returned pointer with `crud_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn crud_client_new(base_url: *const c_char) -> *mut FfiCrudClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let Some(base_url) = str_arg(base_url) else {
            return std::ptr::null_mut();
        };
        let client = crud_core::CrudClient::new(&base_url);
        Box::into_raw(Box::new(FfiCrudClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a `CrudClient` created by `crud_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn crud_client_free(client: *mut FfiCrudClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

/// Id to assign to the next created record given the length of the list
/// the host currently shows.
#[unsafe(no_mangle)]
pub extern "C" fn crud_next_id(current_len: u32) -> i64 {
    crud_core::next_id(current_len as usize)
}

// ---------------------------------------------------------------------------
// Build request functions: products
// ---------------------------------------------------------------------------

/// `GET /products`. Returns null if `client` is null.
#[unsafe(no_mangle)]
pub extern "C" fn crud_build_list_products(client: *const FfiCrudClient) -> *mut FfiHttpRequest {
    build_with(client, |c| Some(c.build_list::<Product>()))
}

/// `POST /new-product`. Returns null if any pointer is null or any string is
/// not UTF-8.
#[unsafe(no_mangle)]
pub extern "C" fn crud_build_create_product(
    client: *const FfiCrudClient,
    id: i64,
    name: *const c_char,
    price: *const c_char,
) -> *mut FfiHttpRequest {
    if name.is_null() || price.is_null() {
        return std::ptr::null_mut();
    }
    build_with(client, |c| {
        let product = Product {
            id,
            name: str_arg(name)?,
            price: str_arg(price)?,
        };
        c.build_create(&product).ok()
    })
}

/// `PUT /update-product/{id}` with the full product as body.
#[unsafe(no_mangle)]
pub extern "C" fn crud_build_update_product(
    client: *const FfiCrudClient,
    id: i64,
    name: *const c_char,
    price: *const c_char,
) -> *mut FfiHttpRequest {
    if name.is_null() || price.is_null() {
        return std::ptr::null_mut();
    }
    build_with(client, |c| {
        let product = Product {
            id,
            name: str_arg(name)?,
            price: str_arg(price)?,
        };
        c.build_update(id, &product).ok()
    })
}

/// `DELETE /remove-product/{id}`.
#[unsafe(no_mangle)]
pub extern "C" fn crud_build_delete_product(client: *const FfiCrudClient, id: i64) -> *mut FfiHttpRequest {
    build_with(client, |c| Some(c.build_delete::<Product>(id)))
}

// ---------------------------------------------------------------------------
// Build request functions: clients
// ---------------------------------------------------------------------------

/// `GET /clients`. Returns null if `client` is null.
#[unsafe(no_mangle)]
pub extern "C" fn crud_build_list_clients(client: *const FfiCrudClient) -> *mut FfiHttpRequest {
    build_with(client, |c| Some(c.build_list::<Client>()))
}

/// `POST /new-client`.
#[unsafe(no_mangle)]
pub extern "C" fn crud_build_create_client(
    client: *const FfiCrudClient,
    id: i64,
    name: *const c_char,
) -> *mut FfiHttpRequest {
    if name.is_null() {
        return std::ptr::null_mut();
    }
    build_with(client, |c| {
        let record = Client { id, name: str_arg(name)? };
        c.build_create(&record).ok()
    })
}

/// `PUT /update-client/{id}` with the full client as body.
#[unsafe(no_mangle)]
pub extern "C" fn crud_build_update_client(
    client: *const FfiCrudClient,
    id: i64,
    name: *const c_char,
) -> *mut FfiHttpRequest {
    if name.is_null() {
        return std::ptr::null_mut();
    }
    build_with(client, |c| {
        let record = Client { id, name: str_arg(name)? };
        c.build_update(id, &record).ok()
    })
}

/// `DELETE /remove-client/{id}`.
#[unsafe(no_mangle)]
pub extern "C" fn crud_build_delete_client(client: *const FfiCrudClient, id: i64) -> *mut FfiHttpRequest {
    build_with(client, |c| Some(c.build_delete::<Client>(id)))
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Parse the response to `crud_build_list_products`.
///
/// Returns a result with `data_tag = ProductList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn crud_parse_list_products(
    client: *const FfiCrudClient,
    response: *const FfiHttpResponse,
) -> *mut FfiCrudResult {
    parse_with(client, response, "crud_parse_list_products", |c, resp| {
        match c.parse_list::<Product>(resp) {
            Ok(products) => FfiCrudResult::ok_product_list(products),
            Err(e) => FfiCrudResult::from_error(e),
        }
    })
}

/// Parse the response to `crud_build_list_clients`.
///
/// Returns a result with `data_tag = ClientList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn crud_parse_list_clients(
    client: *const FfiCrudClient,
    response: *const FfiHttpResponse,
) -> *mut FfiCrudResult {
    parse_with(client, response, "crud_parse_list_clients", |c, resp| {
        match c.parse_list::<Client>(resp) {
            Ok(clients) => FfiCrudResult::ok_client_list(clients),
            Err(e) => FfiCrudResult::from_error(e),
        }
    })
}

/// Parse the response to any create, update or delete request.
///
/// Returns a result with `data_tag = None` on success (any 2xx status).
#[unsafe(no_mangle)]
pub extern "C" fn crud_parse_ack(
    client: *const FfiCrudClient,
    response: *const FfiHttpResponse,
) -> *mut FfiCrudResult {
    parse_with(client, response, "crud_parse_ack", |c, resp| match c.parse_ack(resp) {
        Ok(()) => FfiCrudResult::ok_empty(),
        Err(e) => FfiCrudResult::from_error(e),
    })
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Reclaim a slice produced by `types::into_raw_parts`.
unsafe fn free_slice<T>(items: *mut T, len: u32) -> Box<[T]> {
    unsafe { Box::from_raw(std::ptr::slice_from_raw_parts_mut(items, len as usize)) }
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Free an `FfiHttpRequest` returned by any `crud_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn crud_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.path);
        free_c_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            for h in unsafe { free_slice(req.headers, req.headers_len) }.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free an `FfiCrudResult` returned by any `crud_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn crud_free_result(result: *mut FfiCrudResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::ProductList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiProductList) };
                if !list.items.is_null() && list.len > 0 {
                    for item in unsafe { free_slice(list.items, list.len) }.iter() {
                        free_c_string(item.name);
                        free_c_string(item.price);
                    }
                }
            }
            FfiDataTag::ClientList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiClientList) };
                if !list.items.is_null() && list.len > 0 {
                    for item in unsafe { free_slice(list.items, list.len) }.iter() {
                        free_c_string(item.name);
                    }
                }
            }
            FfiDataTag::None => {}
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn crud_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
