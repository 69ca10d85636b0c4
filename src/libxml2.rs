//! Thin wrapper over libxml2's validating parser.
//!
//! The `libxml` crate exposes schema validation but not DTD validation, so the
//! parse goes through its raw bindings. Everything libxml2 reports during the
//! parse is captured with a structured error handler and handed back as
//! [`StructuredError`]s.

use std::{
    ffi::{c_void, CString, NulError},
    marker::PhantomData,
    os::raw::{c_char, c_int},
    ptr,
};

use libxml::{bindings, error::StructuredError};
use log::trace;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibXml2Error {
    #[error("libxml2 could not allocate a parser context")]
    NoContext,
    #[error("system id contains a NUL byte")]
    InvalidUrl(#[from] NulError),
    #[error("document is too large for libxml2 ({0} bytes)")]
    TooLarge(usize),
}

/// Load the external subset, validate against it, never touch the network.
/// `XML_PARSE_HUGE` stays off so libxml2 keeps its entity amplification limits.
const OPTIONS: c_int = (bindings::xmlParserOption_XML_PARSE_DTDLOAD
    | bindings::xmlParserOption_XML_PARSE_DTDVALID
    | bindings::xmlParserOption_XML_PARSE_NONET) as c_int;

/// Owns one libxml2 parser context.
pub struct LibXml2Wrapper {
    ctxt: bindings::xmlParserCtxtPtr,
}

impl LibXml2Wrapper {
    pub fn new() -> Result<Self, LibXml2Error> {
        let ctxt = unsafe {
            bindings::xmlInitParser();
            bindings::xmlNewParserCtxt()
        };
        if ctxt.is_null() {
            return Err(LibXml2Error::NoContext);
        }
        Ok(Self { ctxt })
    }

    /// Parses `bytes` as the document found at `url` with DTD validation on.
    /// Relative system ids in the document resolve against `url`.
    pub fn validate_memory(
        &mut self,
        url: &str,
        bytes: &[u8],
    ) -> Result<Vec<StructuredError>, LibXml2Error> {
        let size = c_int::try_from(bytes.len()).map_err(|_| LibXml2Error::TooLarge(bytes.len()))?;
        let url = CString::new(url)?;

        let mut errors = Vec::new();
        let handler = ErrorHandler::install(&mut errors);
        let doc = unsafe {
            bindings::xmlCtxtReadMemory(
                self.ctxt,
                bytes.as_ptr() as *const c_char,
                size,
                url.as_ptr(),
                ptr::null(),
                OPTIONS,
            )
        };
        drop(handler);

        if doc.is_null() {
            trace!("libxml2 returned no document for {}", url.to_string_lossy());
        } else {
            unsafe { bindings::xmlFreeDoc(doc) };
        }
        Ok(errors)
    }
}

impl Drop for LibXml2Wrapper {
    fn drop(&mut self) {
        unsafe { bindings::xmlFreeParserCtxt(self.ctxt) };
    }
}

/// Routes libxml2's per-thread structured errors into a vector until dropped.
struct ErrorHandler<'a> {
    _errors: PhantomData<&'a mut Vec<StructuredError>>,
}

impl<'a> ErrorHandler<'a> {
    fn install(errors: &'a mut Vec<StructuredError>) -> Self {
        let data = errors as *mut Vec<StructuredError> as *mut c_void;
        unsafe { bindings::xmlSetStructuredErrorFunc(data, Some(collect_error)) };
        Self {
            _errors: PhantomData,
        }
    }
}

impl Drop for ErrorHandler<'_> {
    fn drop(&mut self) {
        unsafe { bindings::xmlSetStructuredErrorFunc(ptr::null_mut(), None) };
    }
}

unsafe fn collect_error(data: *mut c_void, error: bindings::xmlErrorPtr) {
    if data.is_null() || error.is_null() {
        return;
    }
    let errors = &mut *(data as *mut Vec<StructuredError>);
    errors.push(StructuredError::from_raw(error));
}
