// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android adapter via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. `content://` handles go through the hosting
// Activity's `ContentResolver`; `file://` handles and bare paths use the
// plain-filesystem helpers in `crate::local`.
//
// ## Architecture notes
//
// Shares arrive as `Intent`s in the Activity. The host glue reads the
// action, type and extras and hands them to the receiver as a
// `ShareIntent`; this module only performs the per-handle OS calls that
// follow. All of them are synchronous and are run on blocking worker
// threads, so each call attaches the current thread to the VM.

#![cfg(target_os = "android")]

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;

use image::DynamicImage;
use jni::objects::{JByteArray, JObject, JString, JValue};
use jni::{JNIEnv, JavaVM};

use sharewerk_core::error::{Result, ShareError};
use sharewerk_core::types::{ContentHandle, HandleMetadata};

use crate::local;
use crate::traits::*;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// `OpenableColumns.DISPLAY_NAME`.
const COLUMN_DISPLAY_NAME: &str = "_display_name";

/// `OpenableColumns.SIZE`.
const COLUMN_SIZE: &str = "_size";

/// Read buffer for streaming provider content.
const COPY_BUFFER_LEN: i32 = 8192;

/// `Build.VERSION_CODES.Q`, first release with the sized video thumbnail API.
const API_LEVEL_Q: i32 = 29;

/// `MediaStore.Images.Thumbnails.MINI_KIND`.
const MINI_KIND: i32 = 1;

/// Local references reserved per adapter call.
const LOCAL_FRAME_CAPACITY: i32 = 32;

/// Process-wide VM handle, created on first use.
static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();

/// Obtain a [`JNIEnv`] handle from the global Android context.
///
/// Attaches the current thread if it is not already attached; blocking
/// worker threads are attached on first use and stay attached.
fn jni_env() -> Result<JNIEnv<'static>> {
    let vm = match JAVA_VM.get() {
        Some(vm) => vm,
        None => {
            let ctx = ndk_context::android_context();
            // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue
            // code. The pointer is valid for the lifetime of the process.
            let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
                .map_err(|e| ShareError::Bridge(format!("failed to obtain JavaVM: {e}")))?;
            JAVA_VM.get_or_init(|| vm)
        }
    };
    vm.attach_current_thread_permanently()
        .map_err(|e| ShareError::Bridge(format!("failed to attach JNI thread: {e}")))
}

/// Obtain the hosting Android `Activity` as a [`JObject`].
fn activity() -> Result<JObject<'static>> {
    let ctx = ndk_context::android_context();
    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(ShareError::Bridge(
            "Android context is null, native activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

fn jni_err(context: &str, e: jni::errors::Error) -> ShareError {
    ShareError::Bridge(format!("{context}: {e}"))
}

/// Run `f` inside its own JNI local frame with the hosting activity.
///
/// Worker threads stay attached, so every local reference `f` creates must
/// be released when it returns; popping the frame does that. Any Java
/// exception the calls left pending is cleared first.
fn with_activity<T>(f: impl FnOnce(&mut JNIEnv<'_>, &JObject<'static>) -> Result<T>) -> Result<T> {
    let mut env = jni_env()?;
    let activity = activity()?;
    env.with_local_frame(LOCAL_FRAME_CAPACITY, |env| -> jni::errors::Result<Result<T>> {
        let result = f(env, &activity);
        if result.is_err() && env.exception_check().unwrap_or(false) {
            let _ = env.exception_clear();
        }
        Ok(result)
    })
    .map_err(|e| jni_err("local frame", e))?
}

// ---------------------------------------------------------------------------
// Adapter struct
// ---------------------------------------------------------------------------

/// Android implementation of the share adapter. Zero-sized; all state lives
/// on the Java side.
pub struct AndroidAdapter;

impl AndroidAdapter {
    /// Create a new Android adapter. No JNI call happens until a trait
    /// method is invoked.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformAdapter for AndroidAdapter {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// NativeContent — ContentResolver
// ---------------------------------------------------------------------------

impl NativeContent for AndroidAdapter {
    /// Query `OpenableColumns` and `ContentResolver.getType` for the handle.
    ///
    /// A provider that returns no cursor still yields metadata with only the
    /// content type filled in.
    fn resolve_handle(&self, handle: &ContentHandle) -> Result<HandleMetadata> {
        if let Some(path) = handle.as_local_path() {
            return local::local_metadata(&path);
        }

        with_activity(|env, activity| {
            let uri = parse_uri(env, handle.as_str())?;
            let resolver = content_resolver(env, activity)?;

            let mut meta = HandleMetadata::default();

            // Cursor cursor = resolver.query(uri, null, null, null, null)
            let cursor: JObject = env
                .call_method(
                    &resolver,
                    "query",
                    "(Landroid/net/Uri;[Ljava/lang/String;Ljava/lang/String;[Ljava/lang/String;Ljava/lang/String;)Landroid/database/Cursor;",
                    &[
                        JValue::Object(&uri),
                        JValue::Object(&JObject::null()),
                        JValue::Object(&JObject::null()),
                        JValue::Object(&JObject::null()),
                        JValue::Object(&JObject::null()),
                    ],
                )
                .map_err(|e| jni_err("ContentResolver.query", e))?
                .l()
                .map_err(|e| jni_err("query->l", e))?;

            if !cursor.is_null() {
                let read = read_openable_columns(env, &cursor, &mut meta);
                env.call_method(&cursor, "close", "()V", &[])
                    .map_err(|e| jni_err("Cursor.close", e))?;
                read?;
            }

            // String type = resolver.getType(uri)
            let mime: JObject = env
                .call_method(
                    &resolver,
                    "getType",
                    "(Landroid/net/Uri;)Ljava/lang/String;",
                    &[JValue::Object(&uri)],
                )
                .map_err(|e| jni_err("ContentResolver.getType", e))?
                .l()
                .map_err(|e| jni_err("getType->l", e))?;
            meta.mime_type = optional_string(env, mime)?;

            tracing::debug!(
                %handle,
                name = ?meta.display_name,
                size = ?meta.size_bytes,
                mime = ?meta.mime_type,
                "Android: resolved content handle"
            );
            Ok(meta)
        })
    }

    /// Stream the provider content into `dest` in 8 KiB chunks.
    fn copy_bytes(&self, handle: &ContentHandle, dest: &Path) -> Result<u64> {
        if let Some(path) = handle.as_local_path() {
            return local::copy_local(&path, dest);
        }

        with_activity(|env, activity| {
            let input_stream = open_input_stream(env, activity, handle)?;
            let mut out = File::create(dest)
                .map_err(|e| ShareError::Copy(format!("{}: {e}", dest.display())))?;

            let copied = pump_stream(env, &input_stream, |chunk| {
                out.write_all(chunk)
                    .map_err(|e| ShareError::Copy(format!("{}: {e}", dest.display())))
            });

            env.call_method(&input_stream, "close", "()V", &[])
                .map_err(|e| jni_err("InputStream.close", e))?;

            let copied = copied?;
            tracing::info!(%handle, bytes = copied, "Android: copied content to cache");
            Ok(copied)
        })
    }
}

// ---------------------------------------------------------------------------
// NativeMedia — BitmapFactory / ThumbnailUtils
// ---------------------------------------------------------------------------

impl NativeMedia for AndroidAdapter {
    /// Decode the image behind `handle`.
    ///
    /// Formats the `image` crate knows are decoded in Rust; anything else
    /// (HEIF from recent cameras, for one) is decoded by `BitmapFactory` and
    /// re-encoded as PNG on the Java side.
    fn decode_image(&self, handle: &ContentHandle) -> Result<DynamicImage> {
        if let Some(path) = handle.as_local_path() {
            if let Ok(img) = local::open_local_image(&path) {
                return Ok(img);
            }
        }

        with_activity(|env, activity| {
            let bytes = match handle.as_local_path() {
                Some(path) => std::fs::read(&path)?,
                None => {
                    let input_stream = open_input_stream(env, activity, handle)?;
                    let mut bytes = Vec::new();
                    let read = pump_stream(env, &input_stream, |chunk| {
                        bytes.extend_from_slice(chunk);
                        Ok(())
                    });
                    env.call_method(&input_stream, "close", "()V", &[])
                        .map_err(|e| jni_err("InputStream.close", e))?;
                    read?;
                    bytes
                }
            };

            match local::decode_image_bytes(&bytes) {
                Ok(img) => Ok(img),
                Err(e) => {
                    tracing::debug!(%handle, error = %e, "falling back to BitmapFactory");
                    let j_bytes = env
                        .byte_array_from_slice(&bytes)
                        .map_err(|e| jni_err("byte_array_from_slice", e))?;
                    let len = i32::try_from(bytes.len())
                        .map_err(|_| ShareError::ImageError("image too large".into()))?;
                    let bitmap: JObject = env
                        .call_static_method(
                            "android/graphics/BitmapFactory",
                            "decodeByteArray",
                            "([BII)Landroid/graphics/Bitmap;",
                            &[JValue::Object(&j_bytes), JValue::Int(0), JValue::Int(len)],
                        )
                        .map_err(|e| jni_err("BitmapFactory.decodeByteArray", e))?
                        .l()
                        .map_err(|e| jni_err("decodeByteArray->l", e))?;
                    bitmap_to_image(env, bitmap)
                }
            }
        })
    }

    /// Grab a frame with `ThumbnailUtils`.
    ///
    /// API 29+ decodes straight to the requested size; older releases only
    /// offer the fixed `MINI_KIND` frame, which the caller scales.
    fn extract_video_frame(&self, video: &Path, request: FrameRequest) -> Result<DynamicImage> {
        with_activity(|env, _activity| {
            let sdk_int = env
                .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
                .map_err(|e| jni_err("Build.VERSION.SDK_INT", e))?
                .i()
                .map_err(|e| jni_err("SDK_INT->i", e))?;

            let j_path: JString = env
                .new_string(video.to_string_lossy())
                .map_err(|e| jni_err("new_string(path)", e))?;

            let bitmap: JObject = if sdk_int >= API_LEVEL_Q {
                let file = env
                    .new_object("java/io/File", "(Ljava/lang/String;)V", &[JValue::Object(&j_path)])
                    .map_err(|e| jni_err("new File", e))?;
                let bound = i32::try_from(request.bound).unwrap_or(i32::MAX);
                let size = env
                    .new_object("android/util/Size", "(II)V", &[JValue::Int(bound), JValue::Int(bound)])
                    .map_err(|e| jni_err("new Size", e))?;
                env.call_static_method(
                    "android/media/ThumbnailUtils",
                    "createVideoThumbnail",
                    "(Ljava/io/File;Landroid/util/Size;Landroid/os/CancellationSignal;)Landroid/graphics/Bitmap;",
                    &[
                        JValue::Object(&file),
                        JValue::Object(&size),
                        JValue::Object(&JObject::null()),
                    ],
                )
                .map_err(|e| ShareError::VideoFrame(format!("createVideoThumbnail: {e}")))?
                .l()
                .map_err(|e| jni_err("createVideoThumbnail->l", e))?
            } else {
                env.call_static_method(
                    "android/media/ThumbnailUtils",
                    "createVideoThumbnail",
                    "(Ljava/lang/String;I)Landroid/graphics/Bitmap;",
                    &[JValue::Object(&j_path), JValue::Int(MINI_KIND)],
                )
                .map_err(|e| ShareError::VideoFrame(format!("createVideoThumbnail: {e}")))?
                .l()
                .map_err(|e| jni_err("createVideoThumbnail->l", e))?
            };

            if bitmap.is_null() {
                return Err(ShareError::VideoFrame(format!(
                    "no frame decoded from {}",
                    video.display()
                )));
            }
            tracing::debug!(sdk_int, path = %video.display(), "Android: video frame extracted");
            bitmap_to_image(env, bitmap)
        })
    }
}

// ---------------------------------------------------------------------------
// SharedStore — SharedPreferences (MODE_PRIVATE)
// ---------------------------------------------------------------------------

/// Handoff store backed by a private `SharedPreferences` file.
///
/// Writes use `commit()` rather than `apply()`: the value must be on disk
/// before the sending component finishes.
pub struct PreferencesStore {
    file_name: String,
}

impl PreferencesStore {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_owned(),
        }
    }

    fn edit<'a>(&self, env: &mut JNIEnv<'a>, activity: &JObject<'_>) -> Result<JObject<'a>> {
        let prefs = shared_preferences(env, activity, &self.file_name)?;
        env.call_method(
            &prefs,
            "edit",
            "()Landroid/content/SharedPreferences$Editor;",
            &[],
        )
        .map_err(|e| jni_err("SharedPreferences.edit", e))?
        .l()
        .map_err(|e| jni_err("edit->l", e))
    }
}

impl SharedStore for PreferencesStore {
    fn put(&self, key: &str, value: &str) -> Result<()> {
        with_activity(|env, activity| {
            let editor = self.edit(env, activity)?;
            let j_key: JString = env.new_string(key).map_err(|e| jni_err("new_string(key)", e))?;
            let j_value: JString = env
                .new_string(value)
                .map_err(|e| jni_err("new_string(value)", e))?;

            env.call_method(
                &editor,
                "putString",
                "(Ljava/lang/String;Ljava/lang/String;)Landroid/content/SharedPreferences$Editor;",
                &[JValue::Object(&j_key), JValue::Object(&j_value)],
            )
            .map_err(|e| jni_err("editor.putString", e))?;
            commit(env, &editor)?;

            tracing::info!(key, "Android: pending share stored");
            Ok(())
        })
    }

    fn take(&self, key: &str) -> Result<Option<String>> {
        with_activity(|env, activity| {
            let prefs = shared_preferences(env, activity, &self.file_name)?;
            let j_key: JString = env.new_string(key).map_err(|e| jni_err("new_string(key)", e))?;

            let value: JObject = env
                .call_method(
                    &prefs,
                    "getString",
                    "(Ljava/lang/String;Ljava/lang/String;)Ljava/lang/String;",
                    &[JValue::Object(&j_key), JValue::Object(&JObject::null())],
                )
                .map_err(|e| jni_err("getString", e))?
                .l()
                .map_err(|e| jni_err("getString->l", e))?;

            let Some(value) = optional_string(env, value)? else {
                return Ok(None);
            };

            let editor = self.edit(env, activity)?;
            env.call_method(
                &editor,
                "remove",
                "(Ljava/lang/String;)Landroid/content/SharedPreferences$Editor;",
                &[JValue::Object(&j_key)],
            )
            .map_err(|e| jni_err("editor.remove", e))?;
            commit(env, &editor)?;

            tracing::info!(key, "Android: pending share taken");
            Ok(Some(value))
        })
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// `Uri.parse(raw)`.
fn parse_uri<'a>(env: &mut JNIEnv<'a>, raw: &str) -> Result<JObject<'a>> {
    let j_uri_str: JString = env
        .new_string(raw)
        .map_err(|e| jni_err("new_string(uri)", e))?;
    env.call_static_method(
        "android/net/Uri",
        "parse",
        "(Ljava/lang/String;)Landroid/net/Uri;",
        &[JValue::Object(&j_uri_str)],
    )
    .map_err(|e| jni_err("Uri.parse", e))?
    .l()
    .map_err(|e| jni_err("Uri.parse->l", e))
}

fn content_resolver<'a>(env: &mut JNIEnv<'a>, activity: &JObject<'_>) -> Result<JObject<'a>> {
    env.call_method(
        activity,
        "getContentResolver",
        "()Landroid/content/ContentResolver;",
        &[],
    )
    .map_err(|e| jni_err("getContentResolver", e))?
    .l()
    .map_err(|e| jni_err("getContentResolver->l", e))
}

/// `resolver.openInputStream(Uri.parse(handle))`, rejecting a null stream.
fn open_input_stream<'a>(
    env: &mut JNIEnv<'a>,
    activity: &JObject<'_>,
    handle: &ContentHandle,
) -> Result<JObject<'a>> {
    let uri = parse_uri(env, handle.as_str())?;
    let resolver = content_resolver(env, activity)?;
    let input_stream: JObject = env
        .call_method(
            &resolver,
            "openInputStream",
            "(Landroid/net/Uri;)Ljava/io/InputStream;",
            &[JValue::Object(&uri)],
        )
        .map_err(|e| ShareError::Copy(format!("openInputStream({handle}): {e}")))?
        .l()
        .map_err(|e| jni_err("openInputStream->l", e))?;

    if input_stream.is_null() {
        return Err(ShareError::Copy(format!(
            "ContentResolver returned null InputStream for {handle}"
        )));
    }
    Ok(input_stream)
}

/// Read `input_stream` to the end, handing each chunk to `sink`.
fn pump_stream(
    env: &mut JNIEnv<'_>,
    input_stream: &JObject<'_>,
    mut sink: impl FnMut(&[u8]) -> Result<()>,
) -> Result<u64> {
    let buffer = env
        .new_byte_array(COPY_BUFFER_LEN)
        .map_err(|e| jni_err("new_byte_array", e))?;
    let mut chunk = vec![0i8; COPY_BUFFER_LEN as usize];
    let mut total = 0u64;

    loop {
        let bytes_read: i32 = env
            .call_method(input_stream, "read", "([B)I", &[JValue::Object(&buffer)])
            .map_err(|e| ShareError::Copy(format!("InputStream.read: {e}")))?
            .i()
            .map_err(|e| jni_err("InputStream.read->i", e))?;

        if bytes_read < 0 {
            break;
        }
        let n = bytes_read as usize;
        env.get_byte_array_region(&buffer, 0, &mut chunk[..n])
            .map_err(|e| jni_err("get_byte_array_region", e))?;
        let bytes: Vec<u8> = chunk[..n].iter().map(|&b| b as u8).collect();
        sink(&bytes)?;
        total += n as u64;
    }
    Ok(total)
}

/// Copy the display name and size out of the first cursor row.
fn read_openable_columns(
    env: &mut JNIEnv<'_>,
    cursor: &JObject<'_>,
    meta: &mut HandleMetadata,
) -> Result<()> {
    let has_row = env
        .call_method(cursor, "moveToFirst", "()Z", &[])
        .map_err(|e| jni_err("Cursor.moveToFirst", e))?
        .z()
        .map_err(|e| jni_err("moveToFirst->z", e))?;
    if !has_row {
        return Ok(());
    }

    if let Some(idx) = column_index(env, cursor, COLUMN_DISPLAY_NAME)? {
        let name: JObject = env
            .call_method(cursor, "getString", "(I)Ljava/lang/String;", &[JValue::Int(idx)])
            .map_err(|e| jni_err("Cursor.getString", e))?
            .l()
            .map_err(|e| jni_err("getString->l", e))?;
        meta.display_name = optional_string(env, name)?.filter(|n| !n.is_empty());
    }

    if let Some(idx) = column_index(env, cursor, COLUMN_SIZE)? {
        let is_null = env
            .call_method(cursor, "isNull", "(I)Z", &[JValue::Int(idx)])
            .map_err(|e| jni_err("Cursor.isNull", e))?
            .z()
            .map_err(|e| jni_err("isNull->z", e))?;
        if !is_null {
            let size = env
                .call_method(cursor, "getLong", "(I)J", &[JValue::Int(idx)])
                .map_err(|e| jni_err("Cursor.getLong", e))?
                .j()
                .map_err(|e| jni_err("getLong->j", e))?;
            meta.size_bytes = u64::try_from(size).ok();
        }
    }
    Ok(())
}

fn column_index(env: &mut JNIEnv<'_>, cursor: &JObject<'_>, column: &str) -> Result<Option<i32>> {
    let j_column: JString = env
        .new_string(column)
        .map_err(|e| jni_err("new_string(column)", e))?;
    let idx = env
        .call_method(
            cursor,
            "getColumnIndex",
            "(Ljava/lang/String;)I",
            &[JValue::Object(&j_column)],
        )
        .map_err(|e| jni_err("Cursor.getColumnIndex", e))?
        .i()
        .map_err(|e| jni_err("getColumnIndex->i", e))?;
    Ok((idx >= 0).then_some(idx))
}

fn optional_string(env: &mut JNIEnv<'_>, obj: JObject<'_>) -> Result<Option<String>> {
    if obj.is_null() {
        return Ok(None);
    }
    let s: String = env
        .get_string(&JString::from(obj))
        .map_err(|e| jni_err("get_string", e))?
        .into();
    Ok(Some(s))
}

/// Compress an `android.graphics.Bitmap` to PNG, decode it in Rust and
/// recycle the bitmap.
fn bitmap_to_image(env: &mut JNIEnv<'_>, bitmap: JObject<'_>) -> Result<DynamicImage> {
    if bitmap.is_null() {
        return Err(ShareError::ImageError("BitmapFactory returned null".into()));
    }

    let format: JObject = env
        .get_static_field(
            "android/graphics/Bitmap$CompressFormat",
            "PNG",
            "Landroid/graphics/Bitmap$CompressFormat;",
        )
        .map_err(|e| jni_err("CompressFormat.PNG", e))?
        .l()
        .map_err(|e| jni_err("CompressFormat.PNG->l", e))?;

    let baos: JObject = env
        .new_object("java/io/ByteArrayOutputStream", "()V", &[])
        .map_err(|e| jni_err("new ByteArrayOutputStream", e))?;

    let compressed = env
        .call_method(
            &bitmap,
            "compress",
            "(Landroid/graphics/Bitmap$CompressFormat;ILjava/io/OutputStream;)Z",
            &[JValue::Object(&format), JValue::Int(100), JValue::Object(&baos)],
        )
        .map_err(|e| jni_err("Bitmap.compress", e))?
        .z()
        .map_err(|e| jni_err("compress->z", e))?;

    env.call_method(&bitmap, "recycle", "()V", &[])
        .map_err(|e| jni_err("Bitmap.recycle", e))?;

    if !compressed {
        return Err(ShareError::ImageError("Bitmap.compress failed".into()));
    }

    let java_bytes: JObject = env
        .call_method(&baos, "toByteArray", "()[B", &[])
        .map_err(|e| jni_err("toByteArray", e))?
        .l()
        .map_err(|e| jni_err("toByteArray->l", e))?;
    let png = env
        .convert_byte_array(JByteArray::from(java_bytes))
        .map_err(|e| jni_err("convert_byte_array", e))?;

    local::decode_image_bytes(&png)
}

/// `editor.commit()`, failing if the write did not reach disk.
fn commit(env: &mut JNIEnv<'_>, editor: &JObject<'_>) -> Result<()> {
    let ok = env
        .call_method(editor, "commit", "()Z", &[])
        .map_err(|e| jni_err("editor.commit", e))?
        .z()
        .map_err(|e| jni_err("commit->z", e))?;
    if ok {
        Ok(())
    } else {
        Err(ShareError::Handoff("SharedPreferences commit failed".into()))
    }
}

/// `activity.getSharedPreferences(name, MODE_PRIVATE)`.
fn shared_preferences<'a>(
    env: &mut JNIEnv<'a>,
    activity: &JObject<'_>,
    name: &str,
) -> Result<JObject<'a>> {
    let j_name: JString = env
        .new_string(name)
        .map_err(|e| jni_err("new_string(prefs_name)", e))?;

    env.call_method(
        activity,
        "getSharedPreferences",
        "(Ljava/lang/String;I)Landroid/content/SharedPreferences;",
        &[
            JValue::Object(&j_name),
            JValue::Int(0), // MODE_PRIVATE
        ],
    )
    .map_err(|e| jni_err("getSharedPreferences", e))?
    .l()
    .map_err(|e| jni_err("getSharedPreferences->l", e))
}
