//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! tagged enums with explicit discriminants. Conversion functions live here
//! to keep `lib.rs` focused on the `extern "C"` surface.
//!
//! Strings coming from Rust may in principle contain interior NULs; those
//! bytes are stripped rather than failing the whole conversion.

use std::ffi::CString;
use std::os::raw::c_char;

use crud_core::{ApiError, Client, HttpMethod, HttpRequest, Product};

/// Opaque handle to a `CrudClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiCrudClient {
    pub(crate) inner: crud_core::CrudClient,
}

/// Owned C string from any Rust string, dropping interior NUL bytes.
pub(crate) fn c_string(s: impl Into<Vec<u8>>) -> *mut c_char {
    let mut bytes = s.into();
    bytes.retain(|b| *b != 0);
    CString::new(bytes).unwrap_or_default().into_raw()
}

/// Move a `Vec` onto the heap as a raw pointer + length pair.
pub(crate) fn into_raw_parts<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let len = items.len() as u32;
    let boxed = items.into_boxed_slice();
    (Box::into_raw(boxed) as *mut T, len)
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `crud_build_*` functions. The C caller executes the request
/// and passes the response back through `crud_parse_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let body = match req.body {
            Some(b) => c_string(b),
            None => std::ptr::null_mut(),
        };
        let ffi_headers: Vec<FfiHeader> = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: c_string(k),
                value: c_string(v),
            })
            .collect();
        let (headers, headers_len) = into_raw_parts(ffi_headers);

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path: c_string(req.path),
            headers,
            headers_len,
            body,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing an HTTP request,
/// then passes a pointer to a `crud_parse_*` function. The FFI layer reads
/// but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

/// A product exposed to C. `price` is a string, as on the wire.
#[repr(C)]
pub struct FfiProduct {
    pub id: i64,
    pub name: *mut c_char,
    pub price: *mut c_char,
}

/// A client exposed to C.
#[repr(C)]
pub struct FfiClient {
    pub id: i64,
    pub name: *mut c_char,
}

#[repr(C)]
pub struct FfiProductList {
    pub items: *mut FfiProduct,
    pub len: u32,
}

#[repr(C)]
pub struct FfiClientList {
    pub items: *mut FfiClient,
    pub len: u32,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiCrudResult`.
#[repr(C)]
pub enum FfiErrorCode {
    Ok = 0,
    NotFound = 1,
    Http = 2,
    Deserialization = 3,
    Serialization = 4,
    Transport = 5,
    Panic = 6,
    NullArg = 7,
}

/// Tag that tells `crud_free_result` what `FfiCrudResult::data` points to.
#[repr(C)]
pub enum FfiDataTag {
    None = 0,
    ProductList = 1,
    ClientList = 2,
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiCrudResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut std::ffi::c_void,
}

impl FfiCrudResult {
    fn ok(data_tag: FfiDataTag, data: *mut std::ffi::c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiCrudResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag,
            data,
        }))
    }

    fn err(error_code: FfiErrorCode, http_status: u16, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiCrudResult {
            error_code,
            error_message: c_string(msg),
            http_status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    /// Build a success result carrying a `FfiProductList`.
    pub(crate) fn ok_product_list(products: Vec<Product>) -> *mut Self {
        let items: Vec<FfiProduct> = products
            .into_iter()
            .map(|p| FfiProduct {
                id: p.id,
                name: c_string(p.name),
                price: c_string(p.price),
            })
            .collect();
        let (items, len) = into_raw_parts(items);
        let list = Box::into_raw(Box::new(FfiProductList { items, len }));
        Self::ok(FfiDataTag::ProductList, list as *mut std::ffi::c_void)
    }

    /// Build a success result carrying a `FfiClientList`.
    pub(crate) fn ok_client_list(clients: Vec<Client>) -> *mut Self {
        let items: Vec<FfiClient> = clients
            .into_iter()
            .map(|c| FfiClient {
                id: c.id,
                name: c_string(c.name),
            })
            .collect();
        let (items, len) = into_raw_parts(items);
        let list = Box::into_raw(Box::new(FfiClientList { items, len }));
        Self::ok(FfiDataTag::ClientList, list as *mut std::ffi::c_void)
    }

    /// Build a success result with no data payload (create, update, delete).
    pub(crate) fn ok_empty() -> *mut Self {
        Self::ok(FfiDataTag::None, std::ptr::null_mut())
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let (error_code, http_status) = match &err {
            ApiError::NotFound => (FfiErrorCode::NotFound, 404u16),
            ApiError::HttpError { status, .. } => (FfiErrorCode::Http, *status),
            ApiError::DeserializationError(_) => (FfiErrorCode::Deserialization, 0),
            ApiError::SerializationError(_) => (FfiErrorCode::Serialization, 0),
            ApiError::Transport(_) => (FfiErrorCode::Transport, 0),
        };
        Self::err(error_code, http_status, err.to_string())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::err(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::err(FfiErrorCode::Panic, 0, msg.to_string())
    }
}
